//! Command validation
//!
//! Every raw command passes through here before it can touch a book.
//! Checks run in order and the first failure wins; a rejected command
//! leaves no trace in the service.
//!
//! Checks performed (in order):
//! 1. Known type_op and side
//! 2. Non-empty account and order ids
//! 3. Pair in BASE/QUOTE form
//! 4. Strictly positive decimal amount and limit price

use types::errors::ValidationError;
use types::ids::{AccountId, MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{OrderCommand, Side, TypeOp};

/// A command that passed validation, with all fields parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCommand {
    pub type_op: TypeOp,
    pub account_id: AccountId,
    pub order_id: OrderId,
    pub pair: MarketId,
    pub side: Side,
    pub amount: Quantity,
    pub limit_price: Price,
}

/// Validate a raw command and parse it into typed form
pub fn validate(command: &OrderCommand) -> Result<ValidatedCommand, ValidationError> {
    let type_op = TypeOp::parse(&command.type_op)
        .ok_or_else(|| ValidationError::UnknownTypeOp(command.type_op.clone()))?;
    let side = Side::parse(&command.side)
        .ok_or_else(|| ValidationError::UnknownSide(command.side.clone()))?;

    if command.account_id.is_empty() {
        return Err(ValidationError::EmptyField("account_id"));
    }
    if command.order_id.is_empty() {
        return Err(ValidationError::EmptyField("order_id"));
    }

    let pair = MarketId::try_new(command.pair.clone())
        .ok_or_else(|| ValidationError::InvalidPair(command.pair.clone()))?;

    let amount = Quantity::from_str(&command.amount).map_err(|source| ValidationError::Numeric {
        field: "amount",
        source,
    })?;
    let limit_price =
        Price::from_str(&command.limit_price).map_err(|source| ValidationError::Numeric {
            field: "limit_price",
            source,
        })?;

    Ok(ValidatedCommand {
        type_op,
        account_id: AccountId::new(command.account_id.clone()),
        order_id: OrderId::new(command.order_id.clone()),
        pair,
        side,
        amount,
        limit_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> OrderCommand {
        OrderCommand {
            type_op: "CREATE".to_string(),
            account_id: "1".to_string(),
            order_id: "1".to_string(),
            pair: "BTC/USDC".to_string(),
            side: "BUY".to_string(),
            amount: "0.5".to_string(),
            limit_price: "50000".to_string(),
        }
    }

    #[test]
    fn test_valid_command_parses() {
        let validated = validate(&command()).unwrap();
        assert_eq!(validated.type_op, TypeOp::Create);
        assert_eq!(validated.side, Side::Buy);
        assert_eq!(validated.amount, Quantity::from_str("0.5").unwrap());
        assert_eq!(validated.limit_price, Price::from_u64(50000));
    }

    #[test]
    fn test_unknown_type_op_rejected() {
        let mut cmd = command();
        cmd.type_op = "UPDATE".to_string();
        assert!(matches!(
            validate(&cmd),
            Err(ValidationError::UnknownTypeOp(_))
        ));
    }

    #[test]
    fn test_unknown_side_rejected() {
        let mut cmd = command();
        cmd.side = "HOLD".to_string();
        assert!(matches!(validate(&cmd), Err(ValidationError::UnknownSide(_))));
    }

    #[test]
    fn test_empty_ids_rejected() {
        let mut cmd = command();
        cmd.order_id = String::new();
        assert_eq!(
            validate(&cmd),
            Err(ValidationError::EmptyField("order_id"))
        );

        let mut cmd = command();
        cmd.account_id = String::new();
        assert_eq!(
            validate(&cmd),
            Err(ValidationError::EmptyField("account_id"))
        );
    }

    #[test]
    fn test_bad_pair_rejected() {
        let mut cmd = command();
        cmd.pair = "BTCUSDC".to_string();
        assert!(matches!(validate(&cmd), Err(ValidationError::InvalidPair(_))));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        for bad in ["0", "-1", "abc"] {
            let mut cmd = command();
            cmd.amount = bad.to_string();
            assert!(matches!(
                validate(&cmd),
                Err(ValidationError::Numeric {
                    field: "amount",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_non_positive_price_rejected() {
        for bad in ["0", "-50000", ""] {
            let mut cmd = command();
            cmd.limit_price = bad.to_string();
            assert!(matches!(
                validate(&cmd),
                Err(ValidationError::Numeric {
                    field: "limit_price",
                    ..
                })
            ));
        }
    }
}
