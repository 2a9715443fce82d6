use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Reader {
    /// Pull events from the XML text without building a tree
    Streaming,
    /// Parse the whole document first, then walk its elements
    Tree,
}

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(help = "The source file or URL")]
    pub input: String,

    #[arg(long, value_enum, default_value = "streaming")]
    pub reader: Reader,

    #[arg(
        long,
        help = "Allow a XML Document Type Definition (DTD) to occur, only used by the tree reader"
    )]
    pub allow_dtd: bool,
}
