use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("precis")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summarize a web article with an LLM")
        .arg(clap::arg!(<URL> "Article URL to fetch and summarize"))
        .arg(clap::arg!([MAX_WORDS] "Approximate summary length in words").default_value("200"))
        .arg(clap::arg!(-l --language <LANGUAGE> "Language of the summary").default_value("English"))
        .arg(clap::arg!(-m --model <MODEL> "Chat model to use").default_value("gpt-4o-mini"))
        .arg(clap::arg!(--api_key <KEY> "API key (default: $OPENAI_API_KEY)").value_name("KEY"))
        .arg(clap::arg!(-t --temperature <TEMP> "Sampling temperature, 0.0 to 2.0").default_value("0.4"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds for fetching the page").default_value("20"))
        .arg(clap::arg!(--base_url <URL> "Base URL of an OpenAI-compatible API").value_name("URL"))
        .arg(clap::arg!(--show_text "Also print the extracted article text"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "precis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "precis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "precis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "precis", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
