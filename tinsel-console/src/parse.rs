//! This module handles parsing user input.

use crate::command::{Command, ShowTarget};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until1, take_while1},
    character::complete::{self, multispace0, multispace1},
    combinator::opt,
    number::complete::float,
    sequence::preceded,
    IResult, Parser,
};
use std::ops::RangeInclusive;

/// Parse a command from the user's input.
#[allow(clippy::redundant_closure, reason = "style preference")]
pub fn parse_command(input: &str) -> IResult<&str, Command> {
    alt((
        parse_help.map(|()| Command::Help),
        tag("toggle").map(|_| Command::Toggle),
        tag("state").map(|_| Command::State),
        parse_tick.map(|(frames, delta)| Command::Tick { frames, delta }),
        parse_select.map(|idx| Command::Select(idx)),
        tag("background").map(|_| Command::Background),
        parse_snow.map(|active| Command::Snow(active)),
        parse_palm.map(|score| Command::Palm(score)),
        parse_show.map(|target| Command::Show(target)),
        tag("seed").map(|_| Command::Seed),
        parse_save.map(|filename| Command::Save(filename)),
    ))(input)
}

/// Parse the `help` or `?` command. See [`Command::Help`].
fn parse_help(input: &str) -> IResult<&str, ()> {
    let (input, _) = alt((tag("help"), tag("?")))(input)?;
    Ok((input, ()))
}

/// Parse a `tick` command with its optional frame count and frame time. See [`Command::Tick`].
fn parse_tick(input: &str) -> IResult<&str, (u32, Option<f32>)> {
    let (input, _) = tag("tick")(input)?;
    let (input, frames) = opt(preceded(multispace1, complete::u32))(input)?;
    let (input, delta) = match frames {
        Some(_) => opt(preceded(multispace1, float))(input)?,
        None => (input, None),
    };

    Ok((input, (frames.unwrap_or(1), delta)))
}

/// Parse a `select` command. See [`Command::Select`].
fn parse_select(input: &str) -> IResult<&str, usize> {
    let (input, _) = tag("select")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, idx) = complete::u32(input)?;
    Ok((input, idx as usize))
}

/// Parse a `snow on` or `snow off` command. See [`Command::Snow`].
fn parse_snow(input: &str) -> IResult<&str, bool> {
    let (input, _) = tag("snow")(input)?;
    let (input, _) = multispace1(input)?;
    alt((tag("on").map(|_| true), tag("off").map(|_| false)))(input)
}

/// Parse a `palm` command. See [`Command::Palm`].
fn parse_palm(input: &str) -> IResult<&str, f32> {
    let (input, _) = tag("palm")(input)?;
    let (input, _) = multispace1(input)?;
    float(input)
}

/// Parse a `show` command. See [`Command::Show`].
fn parse_show(input: &str) -> IResult<&str, ShowTarget> {
    /// Parse an optional range of indices after a target name.
    fn parse_optional_range(input: &str) -> IResult<&str, Option<RangeInclusive<usize>>> {
        opt(preceded(multispace1, parse_range))(input)
    }

    let (input, _) = tag("show")(input)?;
    let (input, _) = multispace1(input)?;

    alt((
        tag("progress").map(|_| ShowTarget::Progress),
        tag("star").map(|_| ShowTarget::Star),
        tag("snow").map(|_| ShowTarget::Snow),
        tag("photos").map(|_| ShowTarget::Photos),
        preceded(tag("ornaments"), parse_optional_range).map(ShowTarget::Ornaments),
        preceded(tag("lights"), parse_optional_range).map(ShowTarget::Lights),
    ))(input)
}

/// Parse a single index or an inclusive range of indices like `10:20`.
fn parse_range(input: &str) -> IResult<&str, RangeInclusive<usize>> {
    /// Parse a single index.
    fn parse_one_idx(input: &str) -> IResult<&str, usize> {
        complete::u32.map(|idx| idx as usize).parse(input)
    }

    /// Parse a pair of indices.
    fn parse_pair_of_idx(input: &str) -> IResult<&str, (usize, usize)> {
        let (input, start) = parse_one_idx(input)?;
        let (input, _) = multispace0(input)?;
        let (input, _) = tag(":")(input)?;
        let (input, _) = multispace0(input)?;
        let (input, end) = parse_one_idx(input)?;
        Ok((input, (start, end)))
    }

    alt((
        parse_pair_of_idx.map(|(start, end)| start..=end),
        parse_one_idx.map(|idx| idx..=idx),
    ))(input)
}

/// Parse a `save` command. See [`Command::Save`].
fn parse_save(input: &str) -> IResult<&str, Option<&str>> {
    /// Parse a filename. This could be a simple filename with no escapes, or a filename in double
    /// or single quotes.
    fn parse_filename(input: &str) -> IResult<&str, &str> {
        let (input, _) = multispace1(input)?;
        alt((
            tag("\"")
                .and(take_until1("\""))
                .and(tag("\""))
                .map(|((_, filename), _)| filename),
            tag("'")
                .and(take_until1("'"))
                .and(tag("'"))
                .map(|((_, filename), _)| filename),
            take_while1(|c: char| !c.is_whitespace()),
        ))(input)
    }

    let (input, _) = tag("save")(input)?;
    match parse_filename(input) {
        Ok((input, filename)) => Ok((input, Some(filename))),
        Err(_) => Ok((input, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands_test() {
        assert_eq!(parse_command("help"), Ok(("", Command::Help)));
        assert_eq!(parse_command("?"), Ok(("", Command::Help)));
        assert_eq!(parse_command("toggle"), Ok(("", Command::Toggle)));
        assert_eq!(parse_command("state"), Ok(("", Command::State)));
        assert_eq!(parse_command("background"), Ok(("", Command::Background)));
        assert_eq!(parse_command("seed"), Ok(("", Command::Seed)));

        assert_eq!(parse_command("select 4"), Ok(("", Command::Select(4))));
        assert_eq!(parse_command("snow on"), Ok(("", Command::Snow(true))));
        assert_eq!(parse_command("snow   off"), Ok(("", Command::Snow(false))));
        assert_eq!(parse_command("palm 0.75"), Ok(("", Command::Palm(0.75))));

        assert!(parse_command("select").is_err());
        assert!(parse_command("snow maybe").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn parse_tick_test() {
        assert_eq!(
            parse_command("tick"),
            Ok((
                "",
                Command::Tick {
                    frames: 1,
                    delta: None
                }
            ))
        );
        assert_eq!(
            parse_command("tick 120"),
            Ok((
                "",
                Command::Tick {
                    frames: 120,
                    delta: None
                }
            ))
        );
        assert_eq!(
            parse_command("tick 10 0.5"),
            Ok((
                "",
                Command::Tick {
                    frames: 10,
                    delta: Some(0.5)
                }
            ))
        );
    }

    #[test]
    fn parse_show_test() {
        assert_eq!(
            parse_command("show progress"),
            Ok(("", Command::Show(ShowTarget::Progress)))
        );
        assert_eq!(
            parse_command("show star"),
            Ok(("", Command::Show(ShowTarget::Star)))
        );
        assert_eq!(
            parse_command("show snow"),
            Ok(("", Command::Show(ShowTarget::Snow)))
        );
        assert_eq!(
            parse_command("show photos"),
            Ok(("", Command::Show(ShowTarget::Photos)))
        );
        assert_eq!(
            parse_command("show ornaments"),
            Ok(("", Command::Show(ShowTarget::Ornaments(None))))
        );
        assert_eq!(
            parse_command("show ornaments 10"),
            Ok(("", Command::Show(ShowTarget::Ornaments(Some(10..=10)))))
        );
        assert_eq!(
            parse_command("show lights 8 : 25"),
            Ok(("", Command::Show(ShowTarget::Lights(Some(8..=25)))))
        );
        assert_eq!(
            parse_command("show lights 8:25"),
            Ok(("", Command::Show(ShowTarget::Lights(Some(8..=25)))))
        );

        assert!(parse_command("show").is_err());
        assert!(parse_command("show everything").is_err());
    }

    #[test]
    fn parse_save_test() {
        assert_eq!(parse_command("save"), Ok(("", Command::Save(None))));
        assert_eq!(
            parse_command("save \"file name.ron\""),
            Ok(("", Command::Save(Some("file name.ron"))))
        );
        assert_eq!(
            parse_command("save 'file name.ron'"),
            Ok(("", Command::Save(Some("file name.ron"))))
        );
        assert_eq!(
            parse_command("save /path/to/scene.ron"),
            Ok(("", Command::Save(Some("/path/to/scene.ron"))))
        );
    }

    #[test]
    fn trailing_input_test() {
        assert_eq!(parse_command("toggles"), Ok(("s", Command::Toggle)));
        assert_eq!(
            parse_command("select 3 4"),
            Ok((" 4", Command::Select(3)))
        );
    }
}
