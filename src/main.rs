use anyhow::Result;

fn main() -> Result<()> {
    thumbsynth::run()
}
