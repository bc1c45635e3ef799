use rhythm_core::integrations::task_lists;

use super::{load_config, CmdResult};

pub fn run() -> CmdResult {
    let config = load_config()?;
    let lists = task_lists(&config.google.tasks_base_url, &config.google.access_token)?;
    for list in lists {
        println!("{}\t{}", list.id, list.title);
    }
    Ok(())
}
