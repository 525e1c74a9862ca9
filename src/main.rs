use std::path::PathBuf;
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Cell, Table as ComfyTable};
use postgrust_orm::{record, FindArgs, OrderBy, Orm, SqliteStore, StoreConfig};
use tracing_subscriber::EnvFilter;

record! {
    #[derive(Debug, Clone, Default)]
    pub struct Post {
        #[primary_key]
        "ID" => pub id: i64,
        "Author" => pub author: String,
        "Posted" => pub posted: NaiveDateTime,
        "Likes" => pub likes: i32,
        "Body" => pub body: String,
    }
}

const CREATE_POST_TABLE: &str = "CREATE TABLE IF NOT EXISTS post (
    id integer primary key autoincrement,
    author text,
    posted timestamp,
    likes number,
    body text
)";

/// PostgrustORM demo: store a post and list every post
#[derive(Parser, Debug)]
#[command(name = "postgrust-orm")]
#[command(about = "Create a post through the ORM and list all posts", long_about = None)]
struct Args {
    /// Configuration file (defaults to the standard search paths)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Database file, overrides configuration (`:memory:` for a throwaway database)
    #[arg(short = 'd', long)]
    database: Option<String>,

    /// Post author
    #[arg(short = 'a', long, default_value = "alevy")]
    author: String,

    /// Post body
    #[arg(short = 'b', long, default_value = "Hello fellow kids! This post will surely be viral")]
    body: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("postgrust_orm=info,warn")),
        )
        .init();

    let args = Args::parse();

    // CLI args override everything
    let mut config = StoreConfig::load(args.config.as_deref())?;
    if let Some(database) = args.database {
        config.database = database;
    }

    let store = SqliteStore::open(&config)?;
    store.connection().execute_batch(CREATE_POST_TABLE)?;
    let orm = Orm::new(store);

    let mut post = Post {
        author: args.author,
        posted: Local::now().naive_local(),
        likes: 0,
        body: args.body,
        ..Post::default()
    };
    orm.create(&mut post)?;
    println!("✓ Created post #{}", post.id);

    let posts: Vec<Post> = orm.find(&FindArgs::new().order_by(OrderBy::new().asc("ID")))?;

    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["id", "author", "posted", "likes", "body"].map(Cell::new));
    for post in &posts {
        table.add_row(vec![
            Cell::new(post.id),
            Cell::new(&post.author),
            Cell::new(post.posted.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(post.likes),
            Cell::new(&post.body),
        ]);
    }
    println!("{table}\n({} rows)", posts.len());

    for post in &posts {
        println!("{} said: {}", post.author, post.body);
    }

    Ok(())
}
