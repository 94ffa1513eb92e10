use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transporter API",
        version = "1.0.0",
        description = r#"
# Transporter API

Backend for the driver mobile app of a last-mile delivery and collection workforce.

## Features

- **Auth**: driver login, password change and profile
- **Orders**: assignment by invoice scan, journey start and completion
- **Hold / Return**: exception flows with reason codes and notes
- **Home**: today's totals and cash hand-over to a centre officer
- **Complaints**: driver complaints with daily reference numbers

## Authentication

Every endpoint except login and health expects a JWT from login:

```
Authorization: Bearer <token>
```

The `authToken` cookie set by login is accepted when the header is absent.

## Responses

Success bodies use `{ "status": "success", "message", "data" }`. Errors use:

```json
{
  "status": "error",
  "error": "Conflict",
  "message": "This order is already on hold",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/transporter", description = "Default base path")
    ),
    tags(
        (name = "auth", description = "Driver authentication"),
        (name = "orders", description = "Order assignment and delivery"),
        (name = "hold", description = "Hold flow"),
        (name = "return", description = "Return flow"),
        (name = "home", description = "Dashboard and cash hand-over"),
        (name = "complain", description = "Driver complaints"),
        (name = "health", description = "Health check")
    ),
    paths(
        // Auth
        crate::handlers::auth::login,
        crate::handlers::auth::change_password,
        crate::handlers::auth::get_profile,

        // Orders
        crate::handlers::orders::assign_driver_order,
        crate::handlers::orders::get_driver_orders,
        crate::handlers::orders::get_order_user_details,
        crate::handlers::orders::start_journey,
        crate::handlers::orders::complete_order,

        // Hold
        crate::handlers::holds::get_hold_reasons,
        crate::handlers::holds::submit_hold,

        // Return
        crate::handlers::returns::get_return_reasons,
        crate::handlers::returns::submit_return,
        crate::handlers::returns::get_driver_return_orders,
        crate::handlers::returns::update_return_received,

        // Home
        crate::handlers::home::get_amount,
        crate::handlers::home::get_received_cash,
        crate::handlers::home::hand_over_cash,

        // Complaints
        crate::handlers::complaints::add_complain,
        crate::handlers::complaints::get_complain_categories,
        crate::handlers::complaints::get_my_complains,

        crate::handlers::health::health,
    ),
    components(
        schemas(
            crate::models::DriverOrderStatus,
            crate::errors::ErrorResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDocV1;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "Cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                crate::auth::AUTH_COOKIE_NAME,
            ))),
        );
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
