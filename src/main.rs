use std::path::Path;

use hexwalk::ViewerConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::load_or_default(Path::new("hexwalk.toml"));
    let app = hexwalk::App::new(config)?;
    app.run()
}
