//! Localized GraphQL schema definition and HTTP handlers

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, Object, Schema, TypeRef};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use horae_i18n::{Locale, Translator};
use horae_web::NegotiatedLanguage;

use crate::{
    context::{GraphQLConfig, GraphQLState},
    errors::{GraphQLError, Result},
    resolvers::NowResolver,
    types::DateTimeResult,
};

/// Message ids looked up while building a schema
pub const DATETIME_TYPE_DESCRIPTION: &str = "datetime type description";
pub const CURRENT_DATE_DESCRIPTION: &str = "current date description";
pub const CURRENT_TIME_DESCRIPTION: &str = "current time description";
pub const NOW_QUERY_DESCRIPTION: &str = "now query description";

const DATETIME_TYPE: &str = "DateTime";
const QUERY_TYPE: &str = "Query";

/// A schema whose descriptions are translated for one locale
pub type DateTimeSchema = Schema;

/// Locale a schema was built for, used when a request carries none
#[derive(Debug, Clone)]
struct SchemaLocale(Locale);

/// Build the schema with descriptions resolved by `translator`
///
/// ```graphql
/// type DateTime { date: String, time: String }
/// type Query { now: DateTime }
/// ```
pub fn build_schema(translator: &Translator, resolver: NowResolver, config: &GraphQLConfig) -> Result<DateTimeSchema> {
    let datetime = Object::new(DATETIME_TYPE)
        .description(translator.translate(DATETIME_TYPE_DESCRIPTION))
        .field(string_field("date", translator.translate(CURRENT_DATE_DESCRIPTION), |value| &value.date))
        .field(string_field("time", translator.translate(CURRENT_TIME_DESCRIPTION), |value| &value.time));

    let now = Field::new("now", TypeRef::named(DATETIME_TYPE), |ctx| {
        FieldFuture::new(async move {
            let resolver = ctx.data::<NowResolver>()?;
            let language = match ctx.data_opt::<NegotiatedLanguage>() {
                Some(NegotiatedLanguage(locale)) => locale.clone(),
                None => ctx.data::<SchemaLocale>()?.0.clone(),
            };
            let result = resolver.resolve(&language)?;
            Ok(Some(FieldValue::owned_any(result)))
        })
    })
    .description(translator.translate(NOW_QUERY_DESCRIPTION));

    let query = Object::new(QUERY_TYPE).field(now);

    let mut builder = Schema::build(QUERY_TYPE, None, None)
        .register(datetime)
        .register(query)
        .data(resolver)
        .data(SchemaLocale(translator.locale().clone()));

    if let Some(depth) = config.max_query_depth {
        builder = builder.limit_depth(depth);
    }

    if let Some(complexity) = config.max_query_complexity {
        builder = builder.limit_complexity(complexity);
    }

    if !config.enable_introspection {
        builder = builder.disable_introspection();
    }

    builder.finish().map_err(|e| GraphQLError::Schema {
        locale: translator.locale().to_string(),
        message: e.to_string(),
    })
}

fn string_field(name: &str, description: String, get: fn(&DateTimeResult) -> &String) -> Field {
    Field::new(name, TypeRef::named(TypeRef::STRING), move |ctx| {
        FieldFuture::new(async move {
            let value = ctx.parent_value.try_downcast_ref::<DateTimeResult>()?;
            Ok(Some(FieldValue::value(get(value).clone())))
        })
    })
    .description(description)
}

/// Routes for the GraphQL endpoint, GraphiQL and the localized SDL
///
/// Expects the language negotiation middleware to be layered on top.
pub fn graphql_router(state: GraphQLState, enable_graphiql: bool) -> Router {
    let mut endpoint = post(graphql_handler);
    if enable_graphiql {
        endpoint = endpoint.get(graphiql);
    }

    let path = state.endpoint.clone();
    Router::new()
        .route(&path, endpoint)
        .route("/schema", get(graphql_sdl))
        .with_state(state)
}

/// GraphQL handler for Axum
pub async fn graphql_handler(
    State(state): State<GraphQLState>,
    language: NegotiatedLanguage,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let schema = state.registry.schema_for(language.locale());
    schema.execute(req.into_inner().data(language)).await.into()
}

/// GraphiQL explorer
pub async fn graphiql(State(state): State<GraphQLState>) -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(&state.endpoint).finish())
}

/// SDL of the schema for the negotiated language
pub async fn graphql_sdl(State(state): State<GraphQLState>, language: NegotiatedLanguage) -> impl IntoResponse {
    let schema = state.registry.schema_for(language.locale());
    Json(serde_json::json!({
        "language": language.locale().as_str(),
        "schema": schema.sdl(),
    }))
}
