use std::env;

use stepline::cache::cachedtimeline::CachedTimeline;
use stepline::configuration::CacheConfiguration;

fn main() {
    let configuration = env::args().nth(1).map_or_else(
        CacheConfiguration::default,
        |path| CacheConfiguration::from_reader(&path).unwrap()
    );

    let mut timeline = CachedTimeline::new(configuration);
    timeline.add(10.0, 30.0, 1.0).unwrap();
    timeline.add(20.0, 40.0, 1.0).unwrap();
    timeline.set(25.0, 35.0, 5.0).unwrap();

    println!("{}", timeline.serialize());
    for at in [5.0, 15.0, 25.0, 35.0, 45.0] {
        println!("value at {}: {}", at, timeline.value_at(at).unwrap());
    }
}
