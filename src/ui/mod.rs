pub mod sink;
pub mod term;

pub use sink::{Control, Indicator, TextField, UiSink};
pub use term::TermUi;
