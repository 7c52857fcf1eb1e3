use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

use crate::cli::app::App;

#[derive(Args, Clone, Debug)]
pub struct CompletionsArg {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

pub fn completions(arg: CompletionsArg) -> Result<()> {
    let mut c = App::command();
    let mut stdout = std::io::stdout();
    generate(arg.shell, &mut c, "clonesift", &mut stdout);
    Ok(())
}
