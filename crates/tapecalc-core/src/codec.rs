//! Tagged round-trip encoding of tokens for persistence.
//!
//! Every token encodes to a `[tag, payload]` JSON pair; a sequence encodes to
//! an array of pairs. Decoding dispatches strictly on the tag and rejects
//! anything it does not recognize, so a stale or corrupt record fails loudly
//! for that record alone.

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::token::{BinaryOp, Number, Symbol, Token, UnaryOp};

const TAG_NUMBER: &str = "num";
const TAG_BINARY: &str = "bin";
const TAG_UNARY: &str = "un";
const TAG_GROUP: &str = "grp";
const TAG_SYMBOL: &str = "sym";
const TAG_OPEN: &str = "open";
const TAG_EQ: &str = "eq";

/// Encode one token as a `[tag, payload]` pair.
pub fn encode_token(token: &Token) -> Value {
    match token {
        Token::Number(n) => json!([TAG_NUMBER, [n.is_negative(), n.digits()]]),
        Token::Binary(op) => json!([TAG_BINARY, binary_code(*op)]),
        Token::Unary(op) => json!([TAG_UNARY, unary_code(*op)]),
        Token::Group(inner) => json!([TAG_GROUP, encode_tokens(inner)]),
        Token::Symbol(s) => json!([TAG_SYMBOL, symbol_code(*s)]),
        Token::Open => json!([TAG_OPEN, Value::Null]),
        Token::Eq => json!([TAG_EQ, Value::Null]),
    }
}

/// Encode a token sequence as an array of pairs.
pub fn encode_tokens(tokens: &[Token]) -> Value {
    Value::Array(tokens.iter().map(encode_token).collect())
}

/// Decode one `[tag, payload]` pair back into a token.
pub fn decode_token(value: &Value) -> Result<Token> {
    let pair = value
        .as_array()
        .filter(|a| a.len() == 2)
        .ok_or_else(|| Error::NotAPair(value.to_string()))?;
    let tag = pair[0]
        .as_str()
        .ok_or_else(|| Error::NotAPair(value.to_string()))?;
    let payload = &pair[1];

    match tag {
        TAG_NUMBER => decode_number(payload),
        TAG_BINARY => {
            let code = payload_str(TAG_BINARY, payload)?;
            Ok(Token::Binary(binary_from_code(code)?))
        }
        TAG_UNARY => {
            let code = payload_str(TAG_UNARY, payload)?;
            Ok(Token::Unary(unary_from_code(code)?))
        }
        TAG_GROUP => Ok(Token::Group(decode_tokens(payload)?)),
        TAG_SYMBOL => {
            let code = payload_str(TAG_SYMBOL, payload)?;
            Ok(Token::Symbol(symbol_from_code(code)?))
        }
        TAG_OPEN => Ok(Token::Open),
        TAG_EQ => Ok(Token::Eq),
        other => Err(Error::UnknownTag(other.to_string())),
    }
}

/// Decode an array of pairs back into a token sequence.
pub fn decode_tokens(value: &Value) -> Result<Vec<Token>> {
    let items = value.as_array().ok_or_else(|| Error::MalformedPayload {
        tag: TAG_GROUP,
        detail: format!("expected an array of pairs, got: {value}"),
    })?;
    items.iter().map(decode_token).collect()
}

fn decode_number(payload: &Value) -> Result<Token> {
    let parts = payload
        .as_array()
        .filter(|a| a.len() == 2)
        .ok_or_else(|| Error::MalformedPayload {
            tag: TAG_NUMBER,
            detail: format!("expected [negative, digits], got: {payload}"),
        })?;
    let negative = parts[0].as_bool().ok_or_else(|| Error::MalformedPayload {
        tag: TAG_NUMBER,
        detail: format!("sign flag is not a boolean: {}", parts[0]),
    })?;
    let digits = parts[1].as_str().ok_or_else(|| Error::MalformedPayload {
        tag: TAG_NUMBER,
        detail: format!("digit string is not a string: {}", parts[1]),
    })?;
    let number = Number::from_parts(negative, digits.to_string())
        .ok_or_else(|| Error::InvalidNumber(digits.to_string()))?;
    Ok(Token::Number(number))
}

fn payload_str<'a>(tag: &'static str, payload: &'a Value) -> Result<&'a str> {
    payload.as_str().ok_or_else(|| Error::MalformedPayload {
        tag,
        detail: format!("expected an operator code string, got: {payload}"),
    })
}

fn binary_code(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "add",
        BinaryOp::Sub => "sub",
        BinaryOp::Mul => "mul",
        BinaryOp::Div => "div",
        BinaryOp::Pow => "pow",
        BinaryOp::Exp => "exp",
    }
}

fn binary_from_code(code: &str) -> Result<BinaryOp> {
    match code {
        "add" => Ok(BinaryOp::Add),
        "sub" => Ok(BinaryOp::Sub),
        "mul" => Ok(BinaryOp::Mul),
        "div" => Ok(BinaryOp::Div),
        "pow" => Ok(BinaryOp::Pow),
        "exp" => Ok(BinaryOp::Exp),
        other => Err(Error::MalformedPayload {
            tag: TAG_BINARY,
            detail: format!("unknown operator code: {other:?}"),
        }),
    }
}

fn unary_code(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Recip => "recip",
        UnaryOp::Sqrt => "sqrt",
        UnaryOp::Neg => "neg",
    }
}

fn unary_from_code(code: &str) -> Result<UnaryOp> {
    match code {
        "recip" => Ok(UnaryOp::Recip),
        "sqrt" => Ok(UnaryOp::Sqrt),
        "neg" => Ok(UnaryOp::Neg),
        other => Err(Error::MalformedPayload {
            tag: TAG_UNARY,
            detail: format!("unknown operator code: {other:?}"),
        }),
    }
}

fn symbol_code(s: Symbol) -> &'static str {
    match s {
        Symbol::Ans => "ans",
    }
}

fn symbol_from_code(code: &str) -> Result<Symbol> {
    match code {
        "ans" => Ok(Symbol::Ans),
        other => Err(Error::MalformedPayload {
            tag: TAG_SYMBOL,
            detail: format!("unknown symbol code: {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{evaluate, EvalContext};
    use crate::formula::Formula;
    use crate::token::{BinaryOp, Symbol, UnaryOp};
    use pretty_assertions::assert_eq;

    fn sample_formula() -> Formula {
        // (2+3)×4√ =, which exercises every token kind except Open.
        let mut f = Formula::new();
        f.push_open();
        f.push_digit('2');
        f.push_binary(BinaryOp::Add);
        f.push_digit('3');
        f.push_close();
        f.push_binary(BinaryOp::Mul);
        f.push_digit('4');
        f.push_unary(UnaryOp::Sqrt);
        f.push_eq();
        f
    }

    #[test]
    fn test_round_trip_preserves_evaluation_and_rendering() {
        let f = sample_formula();
        let encoded = encode_tokens(f.tokens());
        let decoded = Formula::from_tokens(decode_tokens(&encoded).unwrap());

        assert_eq!(decoded, f);
        assert_eq!(decoded.to_string(), f.to_string());
        let ctx = EvalContext::default();
        assert_eq!(
            evaluate(decoded.preview_window(), &ctx),
            evaluate(f.preview_window(), &ctx)
        );
    }

    #[test]
    fn test_round_trip_open_marker_and_symbol() {
        let tokens = vec![
            Token::Open,
            Token::Symbol(Symbol::Ans),
            Token::Binary(BinaryOp::Exp),
            Token::Number(Number::from_parts(true, "2.5".into()).unwrap()),
        ];
        let decoded = decode_tokens(&encode_tokens(&tokens)).unwrap();
        assert_eq!(decoded, tokens);
    }

    #[test]
    fn test_wire_shape_is_tag_payload_pairs() {
        let f = sample_formula();
        let encoded = encode_tokens(f.tokens());
        let pairs = encoded.as_array().unwrap();
        assert_eq!(pairs.len(), f.tokens().len());
        for pair in pairs {
            let pair = pair.as_array().unwrap();
            assert_eq!(pair.len(), 2);
            assert!(pair[0].is_string());
        }
        assert_eq!(pairs[0][0], "grp");
        assert_eq!(pairs.last().unwrap()[0], "eq");
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        let err = decode_token(&json!(["frac", "1/2"])).unwrap_err();
        assert!(matches!(err, Error::UnknownTag(tag) if tag == "frac"));
    }

    #[test]
    fn test_malformed_pair_rejected() {
        assert!(decode_token(&json!("num")).is_err());
        assert!(decode_token(&json!(["num"])).is_err());
        assert!(decode_token(&json!([42, null])).is_err());
    }

    #[test]
    fn test_invalid_number_payload_rejected() {
        assert!(decode_token(&json!(["num", [false, "1.2.3"]])).is_err());
        assert!(decode_token(&json!(["num", [false, ""]])).is_err());
        assert!(decode_token(&json!(["num", ["yes", "1"]])).is_err());
        assert!(decode_token(&json!(["bin", "mod"])).is_err());
    }
}
