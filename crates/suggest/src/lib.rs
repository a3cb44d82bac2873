pub mod pipeline;
pub mod recognizer;
pub mod types;

pub use pipeline::{suggest, DispatchError, SuggestionQueue};
pub use recognizer::{CategoryRecognizer, MockRecognizer, RecognizerError, SubstringRecognizer};
pub use types::{Suggestion, SuggestionRequest};
