//! The rendering boundary: token content leaves the core only as a flat list
//! of markup fragments. The presentation layer decides everything else.

use crate::formula::Formula;
use crate::token::Token;

/// Semantic class of a rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentClass {
    Number,
    Operator,
    Parenthesis,
    Symbol,
    Eq,
}

impl FragmentClass {
    /// The class name carried on the fragment's open tag.
    pub fn name(self) -> &'static str {
        match self {
            FragmentClass::Number => "number",
            FragmentClass::Operator => "operator",
            FragmentClass::Parenthesis => "parenthesis",
            FragmentClass::Symbol => "symbol",
            FragmentClass::Eq => "eq",
        }
    }
}

/// One displayable piece of a formula: an (open tag, content, close tag)
/// triple tagged with its semantic class.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub class: FragmentClass,
    pub content: String,
}

impl Fragment {
    fn new(class: FragmentClass, content: impl Into<String>) -> Self {
        Fragment {
            class,
            content: content.into(),
        }
    }

    pub fn open_tag(&self) -> String {
        format!("<span class=\"{}\">", self.class.name())
    }

    pub fn close_tag(&self) -> &'static str {
        "</span>"
    }

    /// The full triple as one markup string.
    pub fn to_markup(&self) -> String {
        format!("{}{}{}", self.open_tag(), self.content, self.close_tag())
    }
}

impl Formula {
    /// Render the formula as an ordered fragment list, one fragment per
    /// token; groups wrap their recursively rendered contents in parenthesis
    /// fragments.
    pub fn fragments(&self) -> Vec<Fragment> {
        let mut out = Vec::new();
        push_fragments(self.tokens(), &mut out);
        out
    }
}

fn push_fragments(tokens: &[Token], out: &mut Vec<Fragment>) {
    for token in tokens {
        match token {
            Token::Number(n) => out.push(Fragment::new(FragmentClass::Number, n.to_string())),
            Token::Binary(op) => out.push(Fragment::new(FragmentClass::Operator, op.to_string())),
            Token::Unary(op) => out.push(Fragment::new(FragmentClass::Operator, op.to_string())),
            Token::Group(inner) => {
                out.push(Fragment::new(FragmentClass::Parenthesis, "("));
                push_fragments(inner, out);
                out.push(Fragment::new(FragmentClass::Parenthesis, ")"));
            }
            Token::Symbol(s) => out.push(Fragment::new(FragmentClass::Symbol, s.to_string())),
            Token::Open => out.push(Fragment::new(FragmentClass::Parenthesis, "(")),
            Token::Eq => out.push(Fragment::new(FragmentClass::Eq, "=")),
        }
    }
}
