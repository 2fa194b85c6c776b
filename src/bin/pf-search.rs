use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Parser};
use pf_places::{ApiKey, Client, ClientConfig, QueryResult, ResponseFormat, SearchRequest};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Run a Places text search and print the decoded result")]
struct CliArgs {
    #[arg(short = 'k', long, env = "PLACES_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(short = 'n', long, help = "Name of the place to look for")]
    name: String,

    #[arg(short = 'a', long, help = "Area to narrow the search, e.g. a city")]
    area: Option<String>,

    #[arg(short = 'f', long, default_value = "json", value_parser = parse_format)]
    format: ResponseFormat,

    #[arg(short = 'l', long, help = "Keep at most this many results")]
    limit: Option<usize>,

    #[command(flatten)]
    options: OptionArgs,

    #[arg(long, help = "Override the text search base path")]
    base_url: Option<String>,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[arg(short = 'o', long, help = "Output file")]
    output: Option<String>,

    #[arg(long, help = "Print the raw response body instead of the decoded result")]
    raw: bool,
}

#[derive(Args, Debug)]
struct OptionArgs {
    #[arg(long)]
    language: Option<String>,

    #[arg(long, help = "Bias location as lat,lng")]
    location: Option<String>,

    #[arg(long, help = "Bias radius in meters")]
    radius: Option<String>,

    #[arg(long)]
    min_price: Option<String>,

    #[arg(long)]
    max_price: Option<String>,

    #[arg(long)]
    open_now: bool,

    #[arg(long = "type", help = "Place type, may be repeated")]
    types: Vec<String>,

    #[arg(long = "param", value_parser = parse_key_val, help = "Extra parameter as key=value")]
    params: Vec<(String, String)>,
}

fn parse_format(s: &str) -> Result<ResponseFormat, String> {
    s.parse().map_err(|e: pf_places::error::UnsupportedFormat| e.to_string())
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s.split_once('=').unwrap_or((s, ""));
    if key.is_empty() {
        return Err(format!("missing parameter name in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn build_request(args: &CliArgs) -> Result<SearchRequest> {
    let mut builder = SearchRequest::builder();
    builder
        .api_key(ApiKey::from_raw(&args.api_key))
        .location_name(args.name.as_str())
        .response_format(args.format);
    if let Some(area) = &args.area {
        builder.location_area_name(area.as_str());
    }
    if let Some(limit) = args.limit {
        builder.result_limit(limit);
    }

    let opts = &args.options;
    let named = [
        ("language", &opts.language),
        ("location", &opts.location),
        ("radius", &opts.radius),
        ("minprice", &opts.min_price),
        ("maxprice", &opts.max_price),
    ];
    for (key, value) in named {
        if let Some(value) = value {
            builder.option(key, value.as_str());
        }
    }
    if opts.open_now {
        builder.option("opennow", "");
    }
    if !opts.types.is_empty() {
        builder.option("types", opts.types.join("|"));
    }
    for (key, value) in &opts.params {
        builder.option(key.as_str(), value.as_str());
    }

    Ok(builder.build()?)
}

fn render(result: &QueryResult, format: ResponseFormat) -> Result<String> {
    let rendered = match format {
        ResponseFormat::Json => serde_json::to_string_pretty(result)?,
        ResponseFormat::Xml => {
            let mut buffer = String::new();
            let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
            serializer.indent(' ', 2);
            result.serialize(serializer)?;
            buffer
        }
    };
    Ok(rendered)
}

fn write_first_name(out: &mut impl Write, result: &QueryResult) -> std::io::Result<()> {
    if let Some(first) = result.results.first() {
        writeln!(out, "\n{}", first.name)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let request = build_request(&args)?;
    let client = Client::with_config(ClientConfig {
        base_url: args.base_url.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
        user_agent: None,
    })?;

    let response = client
        .search(&request)
        .await
        .context("text search failed")?;

    let output = if args.raw {
        response.body.clone()
    } else {
        render(&response.result, request.response_format)?
    };
    if let Some(output_path) = &args.output {
        std::fs::write(output_path, &output)?;
        tracing::info!(path = %output_path, "wrote search result");
    } else {
        println!("{}", output);
    }

    write_first_name(&mut std::io::stdout().lock(), &response.result)?;

    Ok(())
}
