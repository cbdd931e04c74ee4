use nom::{
    IResult,
    branch::alt,
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{map_res, opt, recognize, value, verify},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
};

/// SVG number: optional sign, digits with an optional fraction (or a bare fraction), and an
/// exponent only when digits follow it. `"3-4"` stops before the `-`, `".5.5"` after the
/// first `.5`.
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), opt(digit1))))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        str::parse::<f64>,
    )(input)
}

/// Optional whitespace around at most one comma.
fn comma_wsp(input: &str) -> IResult<&str, ()> {
    value((), tuple((multispace0, opt(char(',')), multispace0)))(input)
}

/// Parse the longest leading decimal number of `s`, ignoring leading whitespace.
///
/// Trailing garbage is ignored (`"10px"` is `10`). Returns `None` when no digits lead the
/// string.
pub(crate) fn parse_number_prefix(s: &str) -> Option<f64> {
    preceded(multispace0, number)(s).ok().map(|(_, v)| v)
}

/// Like [`parse_number_prefix`] but maps missing values to NaN so that geometry math
/// propagates "not measurable" instead of failing.
pub(crate) fn parse_number_or_nan(s: Option<&str>) -> f64 {
    s.and_then(parse_number_prefix).unwrap_or(f64::NAN)
}

/// Finite numbers of a comma/whitespace separated list, up to the first thing that is not
/// one. Numbers may also abut when the next one starts with a sign or a dot (`"3-4.5.5"`).
pub(crate) fn parse_number_list(s: &str) -> Vec<f64> {
    let finite = verify(number, |v: &f64| v.is_finite());
    preceded(comma_wsp, many0(terminated(finite, comma_wsp)))(s)
        .map_or_else(|_| Vec::new(), |(_, values)| values)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
