//! pubfilter - Pandoc JSON filter running the container and diagram rewrites

fn main() -> anyhow::Result<()> {
    pubfilter::cli::main_all()
}
