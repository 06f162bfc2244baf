use log::debug;
use std::env;
use tokio::io::{AsyncBufReadExt, BufReader};

use flavor_graph::actions::TerminalClipboard;
use flavor_graph::render::{RecipeCard, SuggestionsView};
use flavor_graph::{load_featured, App, ClientConfig, FeaturedRecipe, HttpRecipeApi, Notifier};

const HELP: &str = "\
Commands:
  add <a, b, ...>   add ingredients
  rm <n>            remove ingredient number n
  reset             clear ingredients and suggestions
  suggest [a, ...]  suggest recipes (optionally adding ingredients first)
  more              reveal the next page of suggestions
  copy <n>          copy suggestion number n to the clipboard
  share <n>         share suggestion number n
  featured          list featured recipes
  pick <n>          search with the ingredients of featured recipe n
  quit";

struct PrintNotifier;

impl Notifier for PrintNotifier {
    fn notify(&mut self, message: &str) {
        println!("\n{}", message);
    }
}

fn print_chips(app: &App) {
    let chips = app.chips();
    if chips.is_empty() {
        println!("Ingredients: (none)");
        return;
    }
    let labels: Vec<String> = chips
        .iter()
        .map(|c| format!("[{}] {}", c.index + 1, c.label))
        .collect();
    println!("Ingredients: {}", labels.join("  "));
}

fn print_card(number: usize, card: &RecipeCard) {
    println!("\n{}. {}  ({})", number, card.title, card.badge);
    if !card.tags.is_empty() {
        println!("   tags: {}", card.tags.join(", "));
    }
    println!("   {}", card.status);
    if !card.substitutes.is_empty() {
        println!("   Substitutes: {}", card.substitutes.join(", "));
    }
    println!(
        "   covered {} | missing {} | subs {}",
        card.covered_count,
        card.missing_count,
        card.substitutes.len()
    );
}

fn print_view(view: &SuggestionsView) {
    match view {
        SuggestionsView::Cards { cards, sentinel } => {
            for (i, card) in cards.iter().enumerate() {
                print_card(i + 1, card);
            }
            if sentinel.is_some() {
                println!("\n-- type `more` for further suggestions --");
            }
        }
        other => {
            if let Some(message) = other.message() {
                println!("{}", message);
            }
        }
    }
}

fn card_id(app: &App, arg: &str) -> Option<flavor_graph::RecipeId> {
    let number: usize = arg.trim().parse().ok()?;
    app.renderer()
        .painted()
        .get(number.checked_sub(1)?)
        .map(|c| c.recipe.id.clone())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = ClientConfig::load()?;
    debug!("{:#?}", config);
    let api = HttpRecipeApi::new(&config)?;
    let mut app = App::from_config(&config);
    let mut clipboard = TerminalClipboard::stdout();
    let mut notifier = PrintNotifier;
    let mut featured: Vec<FeaturedRecipe> = Vec::new();

    // Ingredients given on the command line trigger an immediate search
    let initial = env::args().skip(1).collect::<Vec<_>>().join(", ");
    if !initial.trim().is_empty() {
        app.suggest_with_pending(&api, &initial).await;
        print_chips(&app);
        print_view(&app.view());
    } else {
        println!("{}", HELP);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "add" => {
                app.add_ingredients(arg);
                print_chips(&app);
            }
            "rm" => {
                if let Some(index) = arg.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                    app.remove_ingredient(index);
                }
                print_chips(&app);
            }
            "reset" => {
                app.reset();
                print_chips(&app);
                print_view(&app.view());
            }
            "suggest" => {
                app.suggest_with_pending(&api, arg).await;
                print_chips(&app);
                print_view(&app.view());
            }
            "more" => match app.load_more() {
                Some(_) => print_view(&app.view()),
                None => println!("No more suggestions."),
            },
            "copy" => match card_id(&app, arg) {
                Some(id) => {
                    app.copy(&id, &mut clipboard, &mut notifier);
                }
                None => println!("No suggestion number {}", arg),
            },
            "share" => match card_id(&app, arg) {
                // Terminals have no native share sheet; sharing falls back to copying
                Some(id) => {
                    app.share(&id, None, &mut clipboard, &mut notifier);
                }
                None => println!("No suggestion number {}", arg),
            },
            "featured" => {
                featured = load_featured(&api, config.featured_count).await;
                for (i, item) in featured.iter().enumerate() {
                    println!("{}. {}  [{}]", i + 1, item.recipe.title, item.meta);
                }
            }
            "pick" => {
                let picked = arg
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| featured.get(i))
                    .cloned();
                match picked {
                    Some(item) => {
                        app.pick_featured(&api, &item).await;
                        print_chips(&app);
                        print_view(&app.view());
                    }
                    None => println!("Run `featured` first, then pick one of the listed numbers."),
                }
            }
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type `help`.", other),
        }
    }

    Ok(())
}
