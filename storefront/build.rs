fn main() {
    println!("cargo::rustc-check-cfg=cfg(pretty_logs)");
    println!("cargo::rerun-if-env-changed=STOREFRONT_PRETTY_LOGS");
    if std::env::var_os("STOREFRONT_PRETTY_LOGS").is_some_and(|value| value == "1") {
        println!("cargo::rustc-cfg=pretty_logs");
    }
}
