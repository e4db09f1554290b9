// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use larder::{
    Ingredient, IngredientCategory, Instruction, Recipe, RecipeIngredient, Tag, Unit, db,
    group_history, load_recipe, write_revision,
};

#[derive(Parser)]
#[command(name = "larder")]
#[command(author, version, about = "Versioned recipe store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the recipe database
    Init {
        /// Database path
        #[arg(short, long, default_value = "recipes.db")]
        db_path: String,
    },
    /// Write the built-in example recipes
    Seed {
        /// Database path
        #[arg(short, long, default_value = "recipes.db")]
        db_path: String,
    },
    /// Print one recipe revision
    Show {
        /// Recipe revision id
        recipe_id: i64,
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Database path
        #[arg(short, long, default_value = "recipes.db")]
        db_path: String,
    },
    /// List all revisions of a recipe group
    History {
        /// Revision group id
        group_id: i64,
        /// Database path
        #[arg(short, long, default_value = "recipes.db")]
        db_path: String,
    },
    /// Write a new revision of an existing recipe
    Revise {
        /// Recipe revision id to start from
        recipe_id: i64,
        /// Replacement title for the new revision
        #[arg(long)]
        title: Option<String>,
        /// Replacement comments for the new revision
        #[arg(long)]
        comments: Option<String>,
        /// Database path
        #[arg(short, long, default_value = "recipes.db")]
        db_path: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db_path } => {
            db::init(&db_path)?;
            println!("Initialized recipe database at {}", db_path);
        }
        Commands::Seed { db_path } => {
            db::init(&db_path)?;
            let mut conn = db::open(&db_path)?;
            for recipe in example_recipes() {
                let written = write_revision(&mut conn, &recipe, None)?;
                println!(
                    "Wrote '{}' (recipe id {}, group {}, version {})",
                    recipe.title, written.recipe_id, written.group_id, written.version
                );
            }
        }
        Commands::Show {
            recipe_id,
            json,
            db_path,
        } => {
            let conn = db::open(&db_path)?;
            match load_recipe(&conn, recipe_id)? {
                Some(recipe) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&recipe)?);
                    } else {
                        print_recipe(&recipe);
                    }
                }
                None => println!("No recipe with id {}", recipe_id),
            }
        }
        Commands::History { group_id, db_path } => {
            let conn = db::open(&db_path)?;
            let revisions = group_history(&conn, group_id)?;
            if revisions.is_empty() {
                println!("No revisions in group {}", group_id);
            } else {
                for recipe in revisions {
                    println!(
                        "v{}  {}  (id {}, created {})",
                        recipe.version.unwrap_or_default(),
                        recipe.title,
                        recipe.id.unwrap_or_default(),
                        recipe.created_at.as_deref().unwrap_or("-")
                    );
                }
            }
        }
        Commands::Revise {
            recipe_id,
            title,
            comments,
            db_path,
        } => {
            let mut conn = db::open(&db_path)?;
            let Some(mut recipe) = load_recipe(&conn, recipe_id)? else {
                anyhow::bail!("no recipe with id {}", recipe_id);
            };
            let Some(group_id) = recipe.group_id else {
                anyhow::bail!("recipe {} has no revision group", recipe_id);
            };
            if let Some(title) = title {
                recipe.title = title;
            }
            if let Some(comments) = comments {
                recipe.comments = Some(comments);
            }
            let written = write_revision(&mut conn, &recipe, Some(group_id))?;
            println!(
                "Wrote version {} of group {} (recipe id {})",
                written.version, written.group_id, written.recipe_id
            );
        }
    }

    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    println!(
        "{} (v{}, group {})",
        recipe.title,
        recipe.version.unwrap_or_default(),
        recipe.group_id.unwrap_or_default()
    );
    if let Some(description) = &recipe.description {
        println!("  {}", description);
    }
    if let Some(comments) = &recipe.comments {
        println!("  Comments: {}", comments);
    }
    if let Some(prep) = recipe.prep_time {
        println!("  Prep: {} min", prep);
    }
    if let Some(cook) = recipe.cook_time {
        println!("  Cook: {} min", cook);
    }
    if let Some(servings) = recipe.servings {
        println!("  Serves: {}", servings);
    }

    println!("  Ingredients:");
    for link in &recipe.ingredients {
        println!(
            "    {} {} {}",
            link.quantity,
            link.unit.as_str(),
            link.ingredient.name
        );
    }

    println!("  Instructions:");
    for instruction in &recipe.instructions {
        println!("    {}. {}", instruction.step_number, instruction.description);
    }

    if !recipe.tags.is_empty() {
        let rendered: Vec<String> = recipe.tags.iter().map(render_tag_chain).collect();
        println!("  Tags: {}", rendered.join(", "));
    }
}

fn render_tag_chain(tag: &Tag) -> String {
    let mut parts = vec![tag.name.clone()];
    let mut child = tag.child.as_deref();
    while let Some(t) = child {
        parts.push(t.name.clone());
        child = t.child.as_deref();
    }
    parts.join(" > ")
}

/// The two example recipes shipped with the store
fn example_recipes() -> Vec<Recipe> {
    let mut pancakes = Recipe::new("Pancakes");
    pancakes.description = Some("Fluffy breakfast pancakes.".to_string());
    pancakes.prep_time = Some(10);
    pancakes.cook_time = Some(15);
    pancakes.servings = Some(4);
    pancakes.ingredients = vec![
        RecipeIngredient::new(Ingredient::new("Flour"), 200.0, Unit::Gram),
        RecipeIngredient::new(Ingredient::new("Milk"), 300.0, Unit::Milliliter),
        RecipeIngredient::new(Ingredient::new("Egg"), 2.0, Unit::Pieces),
        RecipeIngredient::new(Ingredient::new("Butter"), 50.0, Unit::Gram),
    ];
    pancakes.instructions = vec![
        Instruction::new(1, "Mix all dry ingredients."),
        Instruction::new(2, "Add milk and eggs, whisk until smooth."),
        Instruction::new(3, "Heat a frying pan and melt butter."),
        Instruction::new(4, "Pour batter into the pan and cook until golden on both sides."),
    ];
    pancakes.tags = vec![Tag::new("Breakfast"), Tag::new("Easy")];

    let mut spaghetti = Recipe::new("Spaghetti Bolognese");
    spaghetti.description = Some("Classic Italian pasta with meat sauce.".to_string());
    spaghetti.prep_time = Some(15);
    spaghetti.cook_time = Some(45);
    spaghetti.servings = Some(4);
    spaghetti.ingredients = vec![
        RecipeIngredient::new(Ingredient::new("Spaghetti"), 400.0, Unit::Gram),
        RecipeIngredient::new(
            Ingredient::with_category("Ground Beef", IngredientCategory::Meat),
            500.0,
            Unit::Gram,
        ),
        RecipeIngredient::new(Ingredient::new("Tomato Sauce"), 800.0, Unit::Gram),
        RecipeIngredient::new(
            Ingredient::with_category("Onion", IngredientCategory::Vegetable),
            1.0,
            Unit::Pieces,
        ),
        RecipeIngredient::new(
            Ingredient::with_category("Garlic", IngredientCategory::Vegetable),
            2.0,
            Unit::Pieces,
        ),
    ];
    spaghetti.instructions = vec![
        Instruction::new(1, "Boil spaghetti until al dente."),
        Instruction::new(2, "Saute onions and garlic until translucent."),
        Instruction::new(3, "Add ground beef and cook until browned."),
        Instruction::new(4, "Pour in tomato sauce and simmer for 30 minutes."),
        Instruction::new(5, "Serve sauce over spaghetti."),
    ];
    spaghetti.tags = vec![
        Tag::new("Dinner"),
        Tag::with_child("Cuisine", Tag::new("Italian")),
    ];

    vec![pancakes, spaghetti]
}
