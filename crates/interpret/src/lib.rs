pub mod amount;
pub mod interpreter;
pub mod normalize;
pub mod resolver;

pub use amount::{AmountLocator, InterpretError, ParsedAmount};
pub use interpreter::Interpreter;
pub use resolver::{resolve, CategoryResolver, MatchTier, Resolution};
