use clap::{Arg, ArgAction, Command};
use multi_translate::{Coercion, Engine, Model, TranslationRequest, TranslationResponse};
use multi_translate_client::{
    ApiClient, ApiError, ApiResponse, ClientConfig, DefaultApi, MockMode, MockTransport,
    ReqwestTransport, TranslateOptions, Transport,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("multi-translate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Command line client for the multi-translate API")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required_unless_present("ready")
                .index(1),
        )
        .arg(
            Arg::new("to-language")
                .help("Target language code (e.g., fr, es, de)")
                .required_unless_present("ready")
                .index(2),
        )
        .arg(
            Arg::new("from-language")
                .long("from")
                .short('f')
                .help("Source language code (default: detected by the service)"),
        )
        .arg(
            Arg::new("engine")
                .long("engine")
                .short('e')
                .help("Preferred engine")
                .value_parser(Engine::NAMES.to_vec())
                .default_value("best"),
        )
        .arg(
            Arg::new("alignment")
                .long("alignment")
                .short('a')
                .help("Request word alignment")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("fallback")
                .long("fallback")
                .help("Fall back to the best engine if the preferred one fails")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("get")
                .long("get")
                .help("Send parameters in the query string instead of a JSON body")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ready")
                .long("ready")
                .help("Only check that the service is up")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .short('u')
                .help("Service root (default: $MULTI_TRANSLATE_BASE_URL)"),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Accept loosely typed responses")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the in-memory mock instead of the network")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full response as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log requests and responses")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let default_level = if matches.get_flag("verbose") { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let coercion = if matches.get_flag("lenient") {
        Coercion::Lenient
    } else {
        Coercion::Strict
    };

    if matches.get_flag("mock") {
        let client = ApiClient::new(MockTransport::new(MockMode::Suffix)).with_coercion(coercion);
        return run(DefaultApi::with_client(client), &matches).await;
    }

    let config = match matches.get_one::<String>("base-url") {
        Some(url) => ClientConfig::new(url.as_str())?,
        None => match ClientConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ {}", e);
                eprintln!("   Set it with: export MULTI_TRANSLATE_BASE_URL=http://localhost:8000");
                eprintln!("   Or pass --base-url, or use --mock");
                return Err(e.into());
            }
        },
    };
    let config = if matches.get_flag("lenient") {
        config.with_coercion(coercion)
    } else {
        config
    };

    let api: DefaultApi<ReqwestTransport> = DefaultApi::from_config(config)?;
    run(api, &matches).await
}

async fn run<T: Transport>(
    api: DefaultApi<T>,
    matches: &clap::ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    if matches.get_flag("ready") {
        let status = api.ready().await?;
        println!("{}", status);
        return Ok(());
    }

    let (Some(text), Some(to_language)) = (
        matches.get_one::<String>("text"),
        matches.get_one::<String>("to-language"),
    ) else {
        return Err("text and target language are required".into());
    };
    let engine = matches
        .get_one::<String>("engine")
        .map(|name| name.parse::<Engine>())
        .transpose()?
        .unwrap_or_default();

    let mut request = TranslationRequest::new(text.as_str(), to_language.as_str())
        .with_engine(engine)
        .with_alignment(matches.get_flag("alignment"))
        .with_fallback(matches.get_flag("fallback"));
    if let Some(from) = matches.get_one::<String>("from-language") {
        request = request.with_from_language(from.as_str());
    }

    info!(transport = api.client().transport().name(), "translating to {}", request.to_language);

    let result = if matches.get_flag("get") {
        let options = TranslateOptions::from(&request);
        api.translate_get_with_http_info(&request.source_text, &request.to_language, &options)
            .await
    } else {
        api.translate_post_with_http_info(&request).await
    };

    let response = match result {
        Ok(response) => response,
        Err(ApiError::Validation { error, .. }) => {
            for message in error.messages() {
                eprintln!("❌ {}", message);
            }
            return Err("request rejected by the service".into());
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            return Err(e.into());
        }
    };

    print_response(&response, matches.get_flag("json"))
}

fn print_response(
    response: &ApiResponse<TranslationResponse>,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&response.data.to_value()?)?);
        return Ok(());
    }

    let data = &response.data;
    println!("{}", data.translated_text);
    eprintln!(
        "🌍 {} → {} via {}{}",
        data.from_language,
        data.to_language,
        data.engine_label(),
        response
            .translation_source()
            .map(|source| format!(" [{}]", source))
            .unwrap_or_default()
    );
    if let Some(confidence) = data.detected_language_confidence {
        eprintln!("   detected with confidence {:.2}", confidence);
    }
    for section in data.alignment_sections()? {
        eprintln!(
            "   {} [{}..{}] ↔ {} [{}..{}]",
            section.src.text, section.src.start, section.src.end,
            section.dest.text, section.dest.start, section.dest.end
        );
    }

    Ok(())
}
