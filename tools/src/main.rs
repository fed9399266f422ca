use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use libngram_core::{Config, LangModel};

/// Train an n-gram model and optionally dump its count tables.
#[derive(Parser)]
struct Args {
    /// vocabulary file, one token per line
    #[arg(long)]
    vocab: PathBuf,

    /// training corpus, one sentence per line
    #[arg(long)]
    train: PathBuf,

    /// beginning-of-sentence marker
    #[arg(long, default_value = "<s>")]
    bos: String,
    /// end-of-sentence marker
    #[arg(long, default_value = "</s>")]
    eos: String,
    /// unknown-word token
    #[arg(long, default_value = "<UNK>")]
    unk: String,

    /// model order (the n in n-gram)
    #[arg(short = 'n', long, default_value_t = 3)]
    order: usize,

    /// write the count tables to this file after training
    #[arg(long)]
    count_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config {
        vocab: args.vocab,
        train: args.train,
        bos: args.bos,
        eos: args.eos,
        unk: args.unk,
        order: args.order,
        count_file: args.count_file,
    };
    let model = LangModel::new(config)?;

    println!(
        "Trained order-{} model: {} symbols, {} distinct n-grams",
        model.order(),
        model.symbols().size(),
        model.counts().pred().len()
    );
    if let Some(path) = &model.config().count_file {
        println!("Wrote counts to {}", path.display());
    }
    Ok(())
}
