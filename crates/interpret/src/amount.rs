use overmoney_core::{AmountPosition, Money, Side};
use serde::Serialize;
use thiserror::Error;

use crate::normalize::parse_amount;

/// Terminal interpretation failures. Retrying the same text fails the same way.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InterpretError {
    #[error("Message has no space separating an amount from a description")]
    MalformedMessage,
    #[error("No amount found at the start or end of the message")]
    AmountNotFound,
    #[error("Message has an amount but no description")]
    DescriptionMissing,
}

impl InterpretError {
    /// Stable machine-readable name.
    pub fn kind(self) -> &'static str {
        match self {
            InterpretError::MalformedMessage => "malformed_message",
            InterpretError::AmountNotFound => "amount_not_found",
            InterpretError::DescriptionMissing => "description_missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedAmount {
    pub amount: Money,
    /// The message without the amount token, trimmed. Never empty.
    pub description: String,
    pub position: AmountPosition,
}

pub struct AmountLocator;

impl AmountLocator {
    /// Finds the amount at the start or the end of `message`.
    ///
    /// The leading token is the text before the first space and the trailing
    /// token the text after the last one. Candidates are tried front before
    /// back, dot before comma, so `"12 34"` yields 12 with description "34".
    pub fn locate(message: &str) -> Result<ParsedAmount, InterpretError> {
        let (Some(first_space), Some(last_space)) = (message.find(' '), message.rfind(' ')) else {
            return Err(InterpretError::MalformedMessage);
        };
        let leading = &message[..first_space];
        let trailing = &message[last_space + 1..];

        let (position, value) = AmountPosition::PRIORITY
            .iter()
            .find_map(|&position| {
                let token = match position.side() {
                    Side::Front => leading,
                    Side::Back => trailing,
                };
                let value = parse_amount(token, position.mark());
                tracing::trace!(%position, token, matched = value.is_some(), "amount candidate");
                value.map(|v| (position, v))
            })
            .ok_or(InterpretError::AmountNotFound)?;

        let rest = match position.side() {
            Side::Front => &message[first_space + 1..],
            Side::Back => &message[..last_space],
        };
        let description = rest.trim();
        if description.is_empty() {
            return Err(InterpretError::DescriptionMissing);
        }

        Ok(ParsedAmount {
            amount: Money::from_decimal(value),
            description: description.to_string(),
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_decimal(Decimal::from_str(s).unwrap())
    }

    fn ok(message: &str) -> ParsedAmount {
        AmountLocator::locate(message).unwrap()
    }

    #[test]
    fn amount_in_front_both_marks() {
        for (msg, amount, position) in [
            ("500 кофе", "500", AmountPosition::FrontDot),
            ("12.50 coffee beans", "12.50", AmountPosition::FrontDot),
            ("12,50 coffee beans", "12.50", AmountPosition::FrontComma),
        ] {
            let parsed = ok(msg);
            assert_eq!(parsed.amount, money(amount), "{msg}");
            assert_eq!(parsed.position, position, "{msg}");
        }
        assert_eq!(ok("12,50 coffee beans").description, "coffee beans");
    }

    #[test]
    fn amount_behind_both_marks() {
        let parsed = ok("кофе 500");
        assert_eq!(parsed.amount, money("500"));
        assert_eq!(parsed.description, "кофе");
        assert_eq!(parsed.position, AmountPosition::BackDot);

        let parsed = ok("morning coffee 3,75");
        assert_eq!(parsed.amount, money("3.75"));
        assert_eq!(parsed.description, "morning coffee");
        assert_eq!(parsed.position, AmountPosition::BackComma);
    }

    #[test]
    fn comma_amount_keeps_scale() {
        assert_eq!(ok("кофе 12,50").amount.to_string(), "12.50");
    }

    #[test]
    fn front_wins_over_back() {
        let parsed = ok("12 34");
        assert_eq!(parsed.amount, money("12"));
        assert_eq!(parsed.description, "34");
        assert_eq!(parsed.position, AmountPosition::FrontDot);

        let parsed = ok("500 300");
        assert_eq!(parsed.amount, money("500"));
        assert_eq!(parsed.description, "300");
    }

    #[test]
    fn front_comma_beats_back_dot() {
        let parsed = ok("1,5 литра молока 99.90");
        assert_eq!(parsed.position, AmountPosition::FrontComma);
        assert_eq!(parsed.amount, money("1.5"));
        assert_eq!(parsed.description, "литра молока 99.90");
    }

    #[test]
    fn inner_words_are_kept_verbatim() {
        let parsed = ok("пиво  и   чипсы 450");
        assert_eq!(parsed.description, "пиво  и   чипсы");
    }

    #[test]
    fn no_space_is_malformed() {
        assert_eq!(AmountLocator::locate("hello"), Err(InterpretError::MalformedMessage));
        assert_eq!(AmountLocator::locate("500"), Err(InterpretError::MalformedMessage));
        assert_eq!(AmountLocator::locate(""), Err(InterpretError::MalformedMessage));
        // Only the ASCII space separates tokens.
        assert_eq!(AmountLocator::locate("500\tкофе"), Err(InterpretError::MalformedMessage));
    }

    #[test]
    fn no_numeric_end_is_not_found() {
        assert_eq!(AmountLocator::locate("abc def"), Err(InterpretError::AmountNotFound));
        assert_eq!(
            AmountLocator::locate("купил 3 яблока"),
            Err(InterpretError::AmountNotFound)
        );
        assert_eq!(AmountLocator::locate("-500 кофе"), Err(InterpretError::AmountNotFound));
        assert_eq!(AmountLocator::locate("кофе 1e3"), Err(InterpretError::AmountNotFound));
        assert_eq!(AmountLocator::locate("кофе 500р"), Err(InterpretError::AmountNotFound));
    }

    #[test]
    fn bare_decimal_point_amounts() {
        let parsed = ok("кофе 5.");
        assert_eq!(parsed.amount, money("5"));
        assert_eq!(parsed.position, AmountPosition::BackDot);

        let parsed = ok(",5 литра молока");
        assert_eq!(parsed.amount, money("0.5"));
        assert_eq!(parsed.position, AmountPosition::FrontComma);
    }

    #[test]
    fn fraction_too_long_to_store_is_not_an_amount() {
        assert_eq!(
            AmountLocator::locate("кофе 0.00000000000000000000000000001"),
            Err(InterpretError::AmountNotFound)
        );
        assert_eq!(
            AmountLocator::locate("кофе 1.123456789012345678901234567891"),
            Err(InterpretError::AmountNotFound)
        );
    }

    #[test]
    fn empty_remainder_is_description_missing() {
        assert_eq!(AmountLocator::locate("500 "), Err(InterpretError::DescriptionMissing));
        assert_eq!(AmountLocator::locate(" 500"), Err(InterpretError::DescriptionMissing));
        assert_eq!(AmountLocator::locate("500    "), Err(InterpretError::DescriptionMissing));
    }

    #[test]
    fn locate_is_deterministic() {
        let a = AmountLocator::locate("такси 320,40");
        let b = AmountLocator::locate("такси 320,40");
        assert_eq!(a, b);
    }

    #[test]
    fn error_kinds_are_stable() {
        assert_eq!(InterpretError::MalformedMessage.kind(), "malformed_message");
        assert_eq!(InterpretError::AmountNotFound.kind(), "amount_not_found");
        assert_eq!(InterpretError::DescriptionMissing.kind(), "description_missing");
    }
}
