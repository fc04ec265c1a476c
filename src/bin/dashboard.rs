use ascend_stats::{chart, logging, nav};
use log::LevelFilter;

fn main() {
    logging::init(LevelFilter::Info);
    nav::install();
    chart::render_all();
}
