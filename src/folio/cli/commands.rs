use super::render::{print_messages, render_item_detail, render_item_list, render_records};
use super::setup::{ClientCommands, Cli, Commands, ItemCommands, ListArgs, TaxonomyCommands};
use folio::commands::admin::AdminFilter;
use folio::commands::config::ConfigAction;
use folio::error::{FolioError, Result};
use folio::init::{initialize, FolioContext};

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = initialize(cli.data_dir)?;

    match cli.command {
        Commands::Serve { bind } => handle_serve(ctx, bind),
        Commands::Items(cmd) => match cmd {
            ItemCommands::List(args) => handle_item_list(&ctx, args),
            ItemCommands::Show { slug } => handle_item_show(&ctx, &slug),
            ItemCommands::Publish { slugs } => handle_publish(&mut ctx, &slugs, true),
            ItemCommands::Draft { slugs } => handle_publish(&mut ctx, &slugs, false),
        },
        Commands::Categories(cmd) => handle_categories(&mut ctx, cmd),
        Commands::Tags(cmd) => handle_tags(&mut ctx, cmd),
        Commands::Clients(cmd) => handle_clients(&mut ctx, cmd),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn handle_serve(mut ctx: FolioContext, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        ctx.config.bind = bind;
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(FolioError::Io)?;
    runtime.block_on(folio::web::serve(ctx))
}

fn handle_item_list(ctx: &FolioContext, args: ListArgs) -> Result<()> {
    let filter = AdminFilter {
        search: args.search,
        category: args.category,
        published: flag_pair(args.published, args.drafts),
        has_client: flag_pair(args.with_client, args.without_client),
    };
    let result = ctx
        .api
        .admin_items(&filter, args.page.as_deref(), ctx.config.admin_per_page)?;
    if let Some(page) = &result.page {
        print!("{}", render_item_list(page));
    }
    print_messages(&result.messages);
    Ok(())
}

/// `--yes` / `--no` style flag pairs; clap rejects both being set.
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn handle_item_show(ctx: &FolioContext, slug: &str) -> Result<()> {
    let result = ctx.api.show_item(slug)?;
    if let Some(detail) = &result.detail {
        print!("{}", render_item_detail(detail));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_publish(ctx: &mut FolioContext, slugs: &[String], publish: bool) -> Result<()> {
    let result = if publish {
        ctx.api.publish_items(slugs)?
    } else {
        ctx.api.draft_items(slugs)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_categories(ctx: &mut FolioContext, cmd: TaxonomyCommands) -> Result<()> {
    let result = match cmd {
        TaxonomyCommands::List => {
            let result = ctx.api.list_categories()?;
            let records = result.categories.iter().map(|c| (c.name.clone(), c.slug.clone()));
            print!("{}", render_records(records, "No categories."));
            result
        }
        TaxonomyCommands::Add { name, slug } => ctx.api.add_category(&name, &slug)?,
        TaxonomyCommands::Remove { slug } => ctx.api.remove_category(&slug)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(ctx: &mut FolioContext, cmd: TaxonomyCommands) -> Result<()> {
    let result = match cmd {
        TaxonomyCommands::List => {
            let result = ctx.api.list_tags()?;
            let records = result.tags.iter().map(|t| (t.name.clone(), t.slug.clone()));
            print!("{}", render_records(records, "No tags."));
            result
        }
        TaxonomyCommands::Add { name, slug } => ctx.api.add_tag(&name, &slug)?,
        TaxonomyCommands::Remove { slug } => ctx.api.remove_tag(&slug)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_clients(ctx: &mut FolioContext, cmd: ClientCommands) -> Result<()> {
    let result = match cmd {
        ClientCommands::List => {
            let result = ctx.api.list_clients()?;
            let records = result
                .clients
                .iter()
                .map(|c| (c.name.clone(), c.contact_email.clone()));
            print!("{}", render_records(records, "No clients."));
            result
        }
        ClientCommands::Add { name, email } => ctx.api.add_client(&name, &email)?,
        ClientCommands::Remove { name } => ctx.api.remove_client(&name)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &FolioContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let is_show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;

    if is_show_all {
        if let Some(config) = &result.config {
            print!("{}", render_records(config.entries(), "No configuration."));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
