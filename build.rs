use anyhow::Error;
use vergen_gitcl::{Emitter, GitclBuilder};

pub fn main() -> Result<(), Error> {
    // sqlx::migrate! embeds these at compile time.
    println!("cargo:rerun-if-changed=migrations");
    println!("cargo:rerun-if-env-changed=VERGEN_GIT_SHA");

    match std::env::var("VERGEN_GIT_SHA") {
        Ok(sha) if sha != "unknown" => {
            println!("cargo:rustc-env=VERGEN_GIT_SHA={sha}");
            return Ok(());
        }
        _ => {}
    }

    let gitcl = GitclBuilder::default().sha(true).build()?;
    Emitter::default().add_instructions(&gitcl)?.emit()?;

    Ok(())
}
