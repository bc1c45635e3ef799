//! Line-oriented interactive shell.
//!
//! The shell is a small state machine: the current [`Screen`] plus a static
//! routing table mapping `(screen, command)` to a handler. Handlers return a
//! [`Flow`] telling the loop whether to stay, switch screens or exit.

use std::fmt;
use std::io::{self, BufRead, Write};

use rhythm_core::RulesetStore;

use super::{plan, rules, schedule, CmdResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dash,
    Rulesets,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Dash => write!(f, "dash"),
            Screen::Rulesets => write!(f, "rulesets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Stay,
    Go(Screen),
    Quit,
}

type Handler = fn(&[&str]) -> CmdResult<Flow>;

struct Route {
    /// `None` routes are available on every screen.
    screen: Option<Screen>,
    command: &'static str,
    usage: &'static str,
    handler: Handler,
}

impl Route {
    const fn new(
        screen: Option<Screen>,
        command: &'static str,
        usage: &'static str,
        handler: Handler,
    ) -> Self {
        Self {
            screen,
            command,
            usage,
            handler,
        }
    }
}

const DASH: Option<Screen> = Some(Screen::Dash);
const RULESETS: Option<Screen> = Some(Screen::Rulesets);

static ROUTES: &[Route] = &[
    Route::new(None, "help", "help", help),
    Route::new(None, "quit", "quit", quit),
    Route::new(DASH, "show", "show <day>", show),
    Route::new(DASH, "preview", "preview <day>", preview),
    Route::new(DASH, "reset", "reset <day>", reset),
    Route::new(DASH, "rulesets", "rulesets", to_rulesets),
    Route::new(RULESETS, "list", "list", list),
    Route::new(RULESETS, "current", "current", current),
    Route::new(RULESETS, "new", "new <name>", new_ruleset),
    Route::new(RULESETS, "edit", "edit <name>", edit),
    Route::new(RULESETS, "day", "day <weekday>", edit_day),
    Route::new(RULESETS, "back", "back", to_dash),
];

fn route(screen: Screen, command: &str) -> Option<&'static Route> {
    ROUTES
        .iter()
        .find(|r| r.command == command && r.screen.map_or(true, |s| s == screen))
}

fn usages(screen: Screen) -> Vec<&'static str> {
    ROUTES
        .iter()
        .filter(|r| r.screen.map_or(true, |s| s == screen))
        .map(|r| r.usage)
        .collect()
}

/// Handle one input line on `screen`. Blank lines stay put.
pub fn step(screen: Screen, line: &str) -> CmdResult<Flow> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((command, args)) = words.split_first() else {
        return Ok(Flow::Stay);
    };

    match route(screen, command) {
        Some(route) => (route.handler)(args),
        None => Err(format!("unknown command '{command}' on {screen}, try 'help'").into()),
    }
}

pub fn run() -> CmdResult {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut screen = Screen::Dash;

    println!("rhythm shell, 'help' lists commands");
    loop {
        print!("{screen}> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };

        match step(screen, &line?) {
            Ok(Flow::Stay) => {}
            Ok(Flow::Go(next)) => {
                tracing::debug!(from = %screen, to = %next, "screen change");
                screen = next;
            }
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}

fn one_arg<'a>(args: &[&'a str], usage: &str) -> CmdResult<&'a str> {
    match args {
        [arg] => Ok(*arg),
        _ => Err(format!("usage: {usage}").into()),
    }
}

fn help(_args: &[&str]) -> CmdResult<Flow> {
    // help is routed on every screen; list both
    for screen in [Screen::Dash, Screen::Rulesets] {
        println!("{screen}: {}", usages(screen).join(", "));
    }
    Ok(Flow::Stay)
}

fn quit(_args: &[&str]) -> CmdResult<Flow> {
    Ok(Flow::Quit)
}

fn show(args: &[&str]) -> CmdResult<Flow> {
    schedule::show(one_arg(args, "show <day>")?, false)?;
    Ok(Flow::Stay)
}

fn preview(args: &[&str]) -> CmdResult<Flow> {
    plan::preview(one_arg(args, "preview <day>")?, false)?;
    Ok(Flow::Stay)
}

fn reset(args: &[&str]) -> CmdResult<Flow> {
    plan::reset(one_arg(args, "reset <day>")?)?;
    Ok(Flow::Stay)
}

fn to_rulesets(_args: &[&str]) -> CmdResult<Flow> {
    Ok(Flow::Go(Screen::Rulesets))
}

fn to_dash(_args: &[&str]) -> CmdResult<Flow> {
    Ok(Flow::Go(Screen::Dash))
}

fn list(_args: &[&str]) -> CmdResult<Flow> {
    rules::print_titles(&RulesetStore::open_default()?.list_templates()?);
    Ok(Flow::Stay)
}

fn current(_args: &[&str]) -> CmdResult<Flow> {
    rules::print_titles(&RulesetStore::open_default()?.list_current()?);
    Ok(Flow::Stay)
}

fn new_ruleset(args: &[&str]) -> CmdResult<Flow> {
    if args.is_empty() {
        return Err("usage: new <name>".into());
    }
    let path = RulesetStore::open_default()?.create_template(&args.join(" "))?;
    println!("{}", path.display());
    Ok(Flow::Stay)
}

fn edit(args: &[&str]) -> CmdResult<Flow> {
    if args.is_empty() {
        return Err("usage: edit <name>".into());
    }
    rules::edit_template(&RulesetStore::open_default()?, &args.join(" "))?;
    Ok(Flow::Stay)
}

fn edit_day(args: &[&str]) -> CmdResult<Flow> {
    rules::edit_day(&RulesetStore::open_default()?, one_arg(args, "day <weekday>")?)?;
    Ok(Flow::Stay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_stays() {
        assert_eq!(step(Screen::Dash, "   ").unwrap(), Flow::Stay);
    }

    #[test]
    fn navigation_between_screens() {
        assert_eq!(step(Screen::Dash, "rulesets").unwrap(), Flow::Go(Screen::Rulesets));
        assert_eq!(step(Screen::Rulesets, "back").unwrap(), Flow::Go(Screen::Dash));
    }

    #[test]
    fn quit_works_everywhere() {
        assert_eq!(step(Screen::Dash, "quit").unwrap(), Flow::Quit);
        assert_eq!(step(Screen::Rulesets, "quit").unwrap(), Flow::Quit);
    }

    #[test]
    fn commands_are_scoped_to_their_screen() {
        assert!(step(Screen::Rulesets, "reset monday").is_err());
        assert!(step(Screen::Dash, "back").is_err());
        assert!(step(Screen::Dash, "frobnicate").is_err());
    }

    #[test]
    fn missing_argument_reports_usage() {
        let err = step(Screen::Dash, "show").unwrap_err();
        assert_eq!(err.to_string(), "usage: show <day>");
    }

    #[test]
    fn every_route_is_reachable() {
        for r in ROUTES {
            let screen = r.screen.unwrap_or(Screen::Dash);
            assert!(std::ptr::eq(route(screen, r.command).unwrap(), r));
        }
    }
}
