use chrono::Utc;
use dotenv_build::Config;

fn main() {
    dotenv_build::output(Config::default()).expect("unable to load .env");

    let version = Utc::now().format("%Y.%m.%d-%H%M");
    println!("cargo:rustc-env=BUILD_VERSION={version}");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rerun-if-changed=.env");
}
