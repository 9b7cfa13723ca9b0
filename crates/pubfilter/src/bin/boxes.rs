//! boxes - Pandoc JSON filter turning styled Divs into LaTeX environments

use pubfilter::filters::FilterKind;

fn main() -> anyhow::Result<()> {
    pubfilter::cli::main_single(FilterKind::Container)
}
