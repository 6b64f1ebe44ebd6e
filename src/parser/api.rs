use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "parser/numeric.pest"] // relative to src
pub struct NumericParser;

/// Parses a string the way Lua coerces strings in arithmetic: the whole input,
/// minus surrounding whitespace, must be one numeric literal. Returns `None`
/// when it is not.
pub fn parse_numeric_string(input: &str) -> Option<f64> {
    let root = NumericParser::parse(Rule::numeric_string, input)
        .ok()?
        .next()?;
    let mut negative = false;
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::sign => negative = pair.as_str() == "-",
            Rule::hex_number | Rule::decimal_number => {
                let magnitude = build_number(pair)?;
                return Some(if negative { -magnitude } else { magnitude });
            }
            _ => {}
        }
    }
    None
}

fn build_number(pair: Pair<Rule>) -> Option<f64> {
    match pair.as_rule() {
        Rule::hex_number => {
            // `hex_number` only matches hex digits after the prefix. Accumulating
            // in f64 keeps very long literals finite instead of overflowing.
            Some(
                pair.as_str()[2..]
                    .chars()
                    .filter_map(|c| c.to_digit(16))
                    .fold(0.0, |acc, d| acc * 16.0 + d as f64),
            )
        }
        Rule::decimal_number => pair.as_str().parse::<f64>().ok(),
        _ => None,
    }
}
