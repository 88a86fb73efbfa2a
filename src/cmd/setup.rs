use std::path::Path;

use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::workflow::setup::configure;

pub fn run(config_path: &Path) -> AppResult<()> {
    let mut prompter = Prompter::stdio();
    configure(config_path, &mut prompter)?;
    Ok(())
}
