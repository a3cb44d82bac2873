pub mod category;
pub mod message;
pub mod money;
pub mod transaction;

pub use category::{Category, CategoryId, Vocabulary, VocabularyError};
pub use message::{ChatId, Message, UserId};
pub use money::Money;
pub use transaction::{AmountPosition, DecimalMark, ResolvedTransaction, Side};
