use envschema::{Context, Registry, Resolved, Resolver, Schema, Store};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), envschema::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("envschema=info")),
        )
        .init();

    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
    let ctx = Context::new().with("env", env);

    let registry = Registry::new();
    let schema = Schema::from_file(&registry, "demos/schema.toml")?;
    let store = Store::builder()
        .with_file("demos/local.toml", false)
        .with_env("")
        .build()?;

    let resolver = Resolver::new(&registry, &schema, &ctx);
    let invocations = resolver.resolve_all(&store)?;

    for (name, invocation) in &invocations {
        let provenance = match &invocation.resolved {
            Resolved::Store { origin, .. } => format!("store ({origin:?})"),
            Resolved::Schema(_) => "schema default".to_string(),
            Resolved::System => "unset".to_string(),
        };
        let value = invocation
            .value()
            .map(|v| v.to_string())
            .unwrap_or_default();
        println!("{name:<14} {value:<32} {provenance}");
        for attempt in &invocation.errors {
            println!("    {:?}: {}", attempt.source, attempt.failure);
        }
    }

    for group in resolver.schema().groups().keys() {
        let missing = resolver.missing_required(group, &invocations);
        if !missing.is_empty() {
            println!("group '{group}' is missing: {}", missing.join(", "));
        }
    }

    Ok(())
}
