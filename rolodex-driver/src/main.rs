use anyhow::Context;
use dialoguer::Confirm;
use rolodex::contact::{ContactId, ContactPatch, ContactRecord};
use rolodex::store::ContactStore;
use rolodex::OptimisticFavorite;
use rolodex_driver::config::StoreOpt;
use rolodex_driver::Driver;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(StructOpt, Debug)]
#[structopt(name = "rolodex", about = "Keep track of your contacts")]
struct Opt {
    #[structopt(flatten)]
    store: StoreOpt,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// List contacts, optionally only those whose name contains QUERY
    List { query: Option<String> },
    /// Create an empty contact and print its id
    New,
    Show { id: String },
    /// Change the given fields; an empty value clears a field
    Edit {
        id: String,
        #[structopt(long)]
        first: Option<String>,
        #[structopt(long)]
        last: Option<String>,
        #[structopt(long)]
        twitter: Option<String>,
        #[structopt(long)]
        avatar: Option<String>,
        #[structopt(long)]
        notes: Option<String>,
    },
    /// Set favorite to "true" or "false"
    Favorite { id: String, value: String },
    Toggle { id: String },
    Delete {
        id: String,
        /// Do not ask for confirmation
        #[structopt(long, short)]
        yes: bool,
    },
}

fn star(favorite: bool) -> &'static str {
    if favorite {
        "★"
    } else {
        "☆"
    }
}

fn print_contact(contact: &ContactRecord) {
    println!("{}\t{} {}", contact.id, contact.display_name(), star(contact.favorite));
    if let Some(twitter) = &contact.twitter {
        println!("\ttwitter: @{}", twitter);
    }
    if let Some(avatar) = &contact.avatar {
        println!("\tavatar: {}", avatar);
    }
    if let Some(notes) = &contact.notes {
        println!("\tnotes: {}", notes);
    }
    println!("\tcreated: {}", contact.created_at);
}

fn toggle<S: ContactStore>(driver: &Driver<S>, id: &ContactId) -> anyhow::Result<()> {
    let contact = driver.find_contact(id)?;
    let mut favorite = OptimisticFavorite::from_contact(&contact);
    let requested = favorite.next();
    favorite.submit(requested);
    eprintln!("{} -> {} ...", star(favorite.committed()), star(favorite.displayed()));

    let outcome = driver.set_favorite(id, requested);
    let settled = favorite.settle(outcome.as_ref()).ok();
    match settled {
        Some(now) => {
            println!("{}\t{} {}", contact.id, contact.display_name(), star(now));
            Ok(())
        }
        None => {
            eprintln!("reverted to {}", star(favorite.displayed()));
            outcome.map(|_| ()).context("failed to toggle favorite")
        }
    }
}

fn run(opt: Opt) -> anyhow::Result<()> {
    let driver = opt.store.open()?;

    match opt.command {
        Command::List { query } => {
            let contacts = driver.list_contacts(query.as_deref())?;
            if contacts.is_empty() {
                println!("No contacts");
            }
            for contact in contacts {
                println!(
                    "{}\t{} {}\t{}",
                    contact.id,
                    contact.display_name(),
                    star(contact.favorite),
                    contact.created_at
                );
            }
        }
        Command::New => {
            let contact = driver.create_contact()?;
            println!("{}", contact.id);
        }
        Command::Show { id } => {
            print_contact(&driver.find_contact(&ContactId::from(id))?);
        }
        Command::Edit {
            id,
            first,
            last,
            twitter,
            avatar,
            notes,
        } => {
            let patch = ContactPatch {
                first,
                last,
                twitter,
                avatar,
                notes,
                favorite: None,
            };
            print_contact(&driver.edit_contact(&ContactId::from(id), &patch)?);
        }
        Command::Favorite { id, value } => {
            print_contact(&driver.submit_favorite(&ContactId::from(id), &value)?);
        }
        Command::Toggle { id } => toggle(&driver, &ContactId::from(id))?,
        Command::Delete { id, yes } => {
            let id = ContactId::from(id);
            let contact = driver.find_contact(&id)?;
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!(
                        "Please confirm you want to delete {}.",
                        contact.display_name()
                    ))
                    .default(false)
                    .interact()?;
            if confirmed {
                driver.delete_contact(&id)?;
                println!("deleted {}", id);
            } else {
                println!("kept {}", id);
            }
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Opt::from_args())
}
