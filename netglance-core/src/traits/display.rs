//! Status display trait

/// Errors that can occur while driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The bus rejected a transfer; the panel may be in an unknown state
    Transport,
    /// A frame was presented before the panel was initialized
    NotInitialized,
}

/// A text display with a fixed number of rows
///
/// Drawing only touches an off-screen buffer; nothing reaches the panel
/// until [`present`](StatusDisplay::present).
#[allow(async_fn_in_trait)]
pub trait StatusDisplay {
    /// Reset the panel and send its bring-up sequence
    ///
    /// The reset hold is an async delay.
    async fn initialize(&mut self) -> Result<(), DisplayError>;

    /// Blank the off-screen buffer
    fn clear(&mut self);

    /// Draw one text row, clipped to the row's character budget
    fn draw_line(&mut self, row: u8, text: &str);

    /// Transfer the off-screen buffer to the panel
    fn present(&mut self) -> Result<(), DisplayError>;

    /// Clear, draw each line on its own row, and present
    fn show_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<(), DisplayError> {
        self.clear();
        for (row, line) in lines.iter().enumerate() {
            self.draw_line(row as u8, line.as_ref());
        }
        self.present()
    }
}
