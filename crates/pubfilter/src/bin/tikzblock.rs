//! tikzblock - Pandoc JSON filter embedding diagram code blocks as TikZ

use pubfilter::filters::FilterKind;

fn main() -> anyhow::Result<()> {
    pubfilter::cli::main_single(FilterKind::Diagram)
}
