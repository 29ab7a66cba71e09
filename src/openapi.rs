//! OpenAPI document generated from the table registry.

use crate::config::{TableRegistry, TableSpec};
use crate::handlers::QueryRequest;
use utoipa::openapi::path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItem};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::{
    ContentBuilder, InfoBuilder, OpenApi, OpenApiBuilder, PathsBuilder, Required, ResponseBuilder,
};
use utoipa::PartialSchema;

fn response(description: &str) -> utoipa::openapi::Response {
    ResponseBuilder::new().description(description).build()
}

fn query_operation() -> OperationBuilder {
    let body = RequestBodyBuilder::new()
        .content(
            "application/json",
            ContentBuilder::new().schema(Some(QueryRequest::schema())).build(),
        )
        .required(Some(Required::True))
        .build();
    OperationBuilder::new()
        .tag("query")
        .operation_id(Some("run_query"))
        .summary(Some("Run a SELECT statement"))
        .request_body(Some(body))
        .response("200", response("success flag with rows, or success false with the database error"))
        .response("400", response("statement does not start with SELECT"))
        .response("422", response("malformed request body"))
}

fn list_operation(table: &TableSpec) -> OperationBuilder {
    OperationBuilder::new()
        .tag("tables")
        .operation_id(Some(format!("list_{}", table.name)))
        .summary(Some(format!("All rows of {}", table.name)))
        .response("200", response("array of rows"))
        .response("500", response("database error"))
}

fn read_operation(table: &TableSpec) -> OperationBuilder {
    let id = ParameterBuilder::new()
        .name(table.id_column.as_str())
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(format!("{} value, read as the column type", table.id_column)))
        .build();
    OperationBuilder::new()
        .tag("tables")
        .operation_id(Some(format!("get_{}", table.name)))
        .summary(Some(format!("One row of {} by {}", table.name, table.id_column)))
        .parameter(id)
        .response("200", response("row"))
        .response("404", response("no matching row"))
        .response("500", response("database error"))
}

pub fn build(tables: &TableRegistry) -> OpenApi {
    let mut paths = PathsBuilder::new().path("/query", PathItem::new(HttpMethod::Post, query_operation()));
    for table in &tables.tables {
        paths = paths
            .path(
                format!("/{}", table.name),
                PathItem::new(HttpMethod::Get, list_operation(table)),
            )
            .path(
                format!("/{}/{{{}}}", table.name, table.id_column),
                PathItem::new(HttpMethod::Get, read_operation(table)),
            );
    }
    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title(env!("CARGO_PKG_NAME"))
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some(env!("CARGO_PKG_DESCRIPTION"))),
        )
        .paths(paths)
        .build()
}
