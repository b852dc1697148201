//! CLI smoke entry point.
//!
//! # Responsibility
//! - Start file logging and open the default contact store next to this
//!   executable.
//! - Print every contact, standing in for the address-book index view.

use kontakti_core::db::default_db_path;
use kontakti_core::{default_log_level, flush_logging, init_logging, ContactStore, RepoResult};

fn main() {
    println!("kontakti_core version={}", kontakti_core::core_version());
    start_logging();

    let outcome = list_contacts();
    flush_logging();
    if let Err(err) = outcome {
        eprintln!("kontakti: {err}");
        std::process::exit(1);
    }
}

fn list_contacts() -> RepoResult<()> {
    let store = ContactStore::open_default()?;
    let contacts = store.get_all()?;
    log::debug!("event=cli_list module=cli status=ok count={}", contacts.len());

    println!("contacts={}", contacts.len());
    for contact in contacts {
        println!(
            "{}\t{}\t{}\t{}",
            contact.id.unwrap_or_default(),
            contact.name,
            contact.email,
            contact.phone_number.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn start_logging() {
    let Some(log_dir) = default_db_path()
        .ok()
        .and_then(|path| path.parent().map(|dir| dir.join("logs")))
    else {
        return;
    };

    // Logging is best effort for the smoke probe.
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("kontakti: logging disabled: {err}");
    }
}
