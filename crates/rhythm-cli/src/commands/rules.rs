use clap::Subcommand;
use rhythm_core::RulesetStore;

use super::{edit_file, weekday, CmdResult};

#[derive(Subcommand)]
pub enum RulesAction {
    /// List ruleset templates
    List,
    /// List the ruleset in force for each weekday
    Current,
    /// Create a ruleset template
    New {
        /// Template name
        name: String,
    },
    /// Edit a ruleset template in $EDITOR
    Edit {
        /// Template name
        name: String,
    },
    /// Edit a weekday's ruleset in $EDITOR
    EditDay {
        /// Weekday name
        day: String,
    },
}

pub fn run(action: RulesAction) -> CmdResult {
    let store = RulesetStore::open_default()?;
    match action {
        RulesAction::List => print_titles(&store.list_templates()?),
        RulesAction::Current => print_titles(&store.list_current()?),
        RulesAction::New { name } => {
            let path = store.create_template(&name)?;
            println!("{}", path.display());
        }
        RulesAction::Edit { name } => edit_template(&store, &name)?,
        RulesAction::EditDay { day } => edit_day(&store, &day)?,
    }
    Ok(())
}

pub fn print_titles(titles: &[String]) {
    if titles.is_empty() {
        println!("(none)");
    }
    for title in titles {
        println!("{title}");
    }
}

pub fn edit_template(store: &RulesetStore, name: &str) -> CmdResult {
    let path = store.template_path(name)?;
    if !path.exists() {
        return Err(format!("no ruleset named '{name}'").into());
    }
    edit_file(&path)
}

pub fn edit_day(store: &RulesetStore, day: &str) -> CmdResult {
    let path = store.ensure_day(weekday(day)?)?;
    edit_file(&path)
}
