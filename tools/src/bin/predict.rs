use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use libngram_core::{text, Config, LangModel};

/// Train a model and rank the likeliest continuations of a context.
#[derive(Parser)]
struct Args {
    /// context words, most recent last; fewer than the model order
    context: Vec<String>,

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

    /// how many candidates to print
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::new(args.vocab, args.train);
    config.bos = args.bos;
    config.eos = args.eos;
    config.unk = args.unk;
    config.order = args.order;
    let model = LangModel::new(config)?;

    // Out-of-vocabulary context words map to UNK, like training lines do.
    let history: Vec<u32> = args
        .context
        .iter()
        .map(|w| {
            model
                .symbols()
                .get_index(&text::normalize(w))
                .unwrap_or(model.unk_index())
        })
        .collect();

    for (token, p) in model.predict_next(&history, args.top)? {
        println!("{:<12} {:.6}", token, p);
    }
    Ok(())
}
