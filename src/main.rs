use phasetrail::prelude::*;

fn main() {
    if let Err(e) = Viewer::new().run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
