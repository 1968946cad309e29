use crate::reader::ReaderError;

/// Message sent from the reader thread to the GUI.
#[derive(Debug)]
pub enum InputEvent {
    Line(String),
    Closed,
    Failed(ReaderError),
}
