use phonebook::infra::{config, logging};
use phonebook::{PersonDraft, PersonStore, PostgresPersonStore};
use std::io::Write;

fn usage_and_exit() -> ! {
    println!(
        "Please provide the password as an argument: phonebook_cli <password> [name number]\n\
         \n\
         Connection string comes from PHONEBOOK_CLI_DATABASE_URL, with `{{password}}` substituted.\n\
         Default: {}",
        config::DEFAULT_CLI_DATABASE_URL
    );
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(password) = args.first() else {
        usage_and_exit();
    };
    if password == "-h" || password == "--help" {
        usage_and_exit();
    }
    let name = args.get(1);
    let number = args.get(2);

    let store = PostgresPersonStore::connect(&config::cli_database_url(password), 1).await?;

    let mut stdout = std::io::stdout().lock();
    let outcome = match (name, number) {
        (Some(name), Some(number)) => add(&store, &mut stdout, name, number).await,
        _ => list(&store, &mut stdout).await,
    };

    // Only close once the operation above has been acknowledged.
    store.close().await;
    outcome
}

async fn add(
    store: &dyn PersonStore,
    out: &mut impl Write,
    name: &str,
    number: &str,
) -> anyhow::Result<()> {
    let saved = store.create(PersonDraft::new(name, number)).await?;
    writeln!(out, "added {} number {} to phonebook", saved.name, saved.number)?;
    Ok(())
}

async fn list(store: &dyn PersonStore, out: &mut impl Write) -> anyhow::Result<()> {
    let people = store.list_all().await?;
    writeln!(out, "phonebook:")?;
    for person in people {
        writeln!(out, "{} {}", person.name, person.number)?;
    }
    Ok(())
}
