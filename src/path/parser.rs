//! `nom` combinators decomposing a field-path string into [`super::ParsedPath`].

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::opt,
    multi::separated_list1,
    sequence::delimited,
    IResult, Parser,
};

use super::{Attribute, ParsedPath, PathError, Root, Segment, Step};

pub fn parse_path(input: &str) -> Result<ParsedPath<'_>, PathError> {
    let hash_count = input.matches('#').count();
    if hash_count == 0 {
        return Err(PathError::MissingSeparator(input.to_string()));
    }
    if hash_count > 1 {
        return Err(PathError::MultipleSeparators(input.to_string()));
    }
    let split_at = input.find('#').expect("checked above");
    let (root_str, rest) = (&input[..split_at], &input[split_at + 1..]);

    let root = parse_root(root_str, input)?;
    let steps = parse_attribute_path(rest, input)?;
    Ok(ParsedPath { root, steps })
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_').parse(input)
}

fn bracket_index(input: &str) -> IResult<&str, Option<&str>> {
    delimited(char('['), opt(digit1), char(']')).parse(input)
}

fn parse_root<'a>(root_str: &'a str, original: &str) -> Result<Root<'a>, PathError> {
    match root_str {
        "$aas" => Ok(Root::Aas),
        "$sm" => Ok(Root::Sm),
        "$cd" => Ok(Root::Cd),
        _ if root_str == "$sme" || root_str.starts_with("$sme.") => {
            let tail = &root_str["$sme".len()..];
            if tail.is_empty() {
                return Ok(Root::Sme(Vec::new()));
            }
            let tail = &tail[1..]; // drop leading '.'
            let (remaining, segments) =
                separated_list1(char('.'), sme_segment)
                    .parse(tail)
                    .map_err(|_| PathError::UnknownRoot(original.to_string()))?;
            if !remaining.is_empty() {
                return Err(PathError::TrailingInput(
                    original.to_string(),
                    remaining.to_string(),
                ));
            }
            Ok(Root::Sme(segments))
        }
        _ => Err(PathError::UnknownRoot(original.to_string())),
    }
}

fn sme_segment(input: &str) -> IResult<&str, Segment<'_>> {
    let (input, name) = ident(input)?;
    let (input, index) = opt(bracket_index).parse(input)?;
    let segment = match index {
        None => Segment::Named(name),
        Some(None) => Segment::ArrayAll(name),
        Some(Some(digits)) => Segment::ArrayIndexed(name, digits.parse().expect("digit1 matched")),
    };
    Ok((input, segment))
}

fn parse_attribute_path(rest: &str, original: &str) -> Result<Vec<Step>, PathError> {
    let (remaining, tokens) = separated_list1(char('.'), attribute_step_token)
        .parse(rest)
        .map_err(|_| PathError::UnknownAttribute(original.to_string(), rest.to_string()))?;
    if !remaining.is_empty() {
        return Err(PathError::TrailingInput(
            original.to_string(),
            remaining.to_string(),
        ));
    }

    tokens
        .into_iter()
        .map(|(name, index)| to_step(name, index, original))
        .collect()
}

fn attribute_step_token(input: &str) -> IResult<&str, (&str, Option<Option<&str>>)> {
    let (input, name) = ident(input)?;
    let (input, index) = opt(bracket_index).parse(input)?;
    Ok((input, (name, index)))
}

fn to_step(name: &str, index: Option<Option<&str>>, original: &str) -> Result<Step, PathError> {
    match name {
        "keys" => Ok(Step::Keys(parse_step_index(index, name, original)?)),
        "specificAssetIds" => Ok(Step::SpecificAssetIds(parse_step_index(
            index, name, original,
        )?)),
        _ => {
            if index.is_some() {
                return Err(PathError::MalformedIndex(
                    original.to_string(),
                    name.to_string(),
                ));
            }
            Attribute::from_name(name)
                .map(Step::Attribute)
                .ok_or_else(|| PathError::UnknownAttribute(original.to_string(), name.to_string()))
        }
    }
}

fn parse_step_index(
    index: Option<Option<&str>>,
    step_name: &str,
    original: &str,
) -> Result<Option<u64>, PathError> {
    match index {
        None => Ok(None),
        Some(Some(digits)) => digits
            .parse()
            .map(Some)
            .map_err(|_| PathError::MalformedIndex(original.to_string(), step_name.to_string())),
        Some(None) => Err(PathError::MalformedIndex(
            original.to_string(),
            format!("{step_name}[]"),
        )),
    }
}
