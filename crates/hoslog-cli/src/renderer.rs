//! Terminal rendering for the markdown produced by the core display types.
//!
//! Rich output goes through termimad so log sheet tables get aligned
//! columns and borders; `--no-color` prints the markdown unchanged, which is
//! also what the tests match against.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.table.set_fg(Color::AnsiValue(244));
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            print!("{}", self.skin.term_text(markdown));
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Prints text that must stay machine-readable (JSON, TOML).
    pub fn raw(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
