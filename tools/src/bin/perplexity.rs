use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use libngram_core::{text, Config, LangModel};

/// Train a model and report perplexity over a held-out corpus.
#[derive(Parser)]
struct Args {
    /// held-out corpus to score, one sentence per line
    test: PathBuf,

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
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::new(args.vocab, args.train);
    config.bos = args.bos;
    config.eos = args.eos;
    config.unk = args.unk;
    config.order = args.order;
    let model = LangModel::new(config)?;

    let file = File::open(&args.test)
        .with_context(|| format!("opening held-out corpus {}", args.test.display()))?;
    let reader = BufReader::new(file);

    let mut log_prob = 0.0f64;
    let mut predicted = 0u64;
    let mut sentences = 0u64;
    for line in reader.lines() {
        let line = line?;
        log_prob += model.score_sentence(&line);
        // Every word plus the end marker is one predicted position.
        predicted += text::tokenize(&line).len() as u64 + 1;
        sentences += 1;
    }

    if predicted == 0 {
        println!("Nothing to score in {}", args.test.display());
        return Ok(());
    }
    println!("Scored {} sentences, {} predicted tokens", sentences, predicted);
    println!("Total log-probability: {:.4}", log_prob);
    println!("Perplexity: {:.4}", (-log_prob / predicted as f64).exp());
    Ok(())
}
