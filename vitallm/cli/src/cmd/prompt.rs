use anyhow::{Result, bail};
use clap::Args;

use vitallm_generate::{DEFAULT_SYSTEM_PROMPT, PromptTemplate};

use super::backend::{Backend, EosArgs};
use super::tokenizer::format_ids;

#[derive(Args)]
pub struct PromptArgs {
    /// Latest user message.
    message: String,

    /// System instruction placed before the conversation turn.
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_SYSTEM_PROMPT, hide_default_value = true)]
    system: String,

    /// Label of the user turn.
    #[arg(long, value_name = "LABEL", default_value = "Patient")]
    role_label: String,

    /// Label the model continues from.
    #[arg(long, value_name = "LABEL", default_value = "Doctor")]
    assistant_label: String,

    /// Print token IDs of the composed prompt instead of its text (needs a backend).
    #[arg(long)]
    ids: bool,

    /// Print IDs as a JSON array (with --ids).
    #[arg(long, requires = "ids")]
    json: bool,

    #[command(flatten)]
    backend: Backend,

    #[command(flatten)]
    eos: EosArgs,
}

pub fn run(args: PromptArgs) -> Result<()> {
    let template = PromptTemplate::new(args.role_label, args.assistant_label);
    let prompt = template.compose(&args.system, &args.message);
    log::debug!("composed prompt ({} chars)", prompt.len());

    if !args.ids {
        if args.backend.is_selected() {
            eprintln!("Tokenizer backend ignored without --ids");
        }
        println!("{prompt}");
        return Ok(());
    }

    let Some(tokenizer) = args.backend.load(&args.eos)? else {
        bail!("--ids requires a tokenizer backend (--byte, --hf or --bpe)");
    };
    let ids = tokenizer.encode(&prompt)?;
    eprintln!("{} prompt tokens", ids.len());
    println!("{}", format_ids(&ids, args.json));
    Ok(())
}
