// config.rs
use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use crate::lang::ResourceOptions;

/// QuillEdit - spell correction, synonym lookup and paraphrasing backend
#[derive(Parser, Debug, Clone)]
#[command(name = "quilledit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Args {
    /// Address the API listens on
    #[arg(long, env = "QUILLEDIT_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Word frequency table (`word count` per line); bundled table if unset
    #[arg(long, env = "QUILLEDIT_WORDS")]
    pub words: Option<PathBuf>,

    /// Lexicon JSON file; bundled lexicon if unset
    #[arg(long, env = "QUILLEDIT_LEXICON")]
    pub lexicon: Option<PathBuf>,

    /// Do not load harper's curated dictionary
    #[arg(long)]
    pub no_harper_dictionary: bool,

    /// Seed for paraphrase choices
    #[arg(long, env = "QUILLEDIT_SEED")]
    pub seed: Option<u64>,
}

impl Args {
    pub fn resources(&self) -> ResourceOptions {
        ResourceOptions {
            words: self.words.clone(),
            lexicon: self.lexicon.clone(),
            harper_dictionary: !self.no_harper_dictionary,
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["quilledit"]);
        assert_eq!(args.bind, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        let resources = args.resources();
        assert!(resources.harper_dictionary);
        assert!(resources.words.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "quilledit",
            "--bind",
            "0.0.0.0:8080",
            "--lexicon",
            "lex.json",
            "--no-harper-dictionary",
            "--seed",
            "9",
        ]);
        assert_eq!(args.bind.port(), 8080);
        assert_eq!(args.seed, Some(9));
        let resources = args.resources();
        assert!(!resources.harper_dictionary);
        assert_eq!(resources.lexicon, Some(PathBuf::from("lex.json")));
    }
}
