use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, UserList},
        cart::{AddToCartRequest, CartLine, CartOverview, CartOverviewList, CartWithItems},
        items::ItemList,
        orders::{OrderLine, OrderList, OrderWithItems},
    },
    models::{Cart, CartItem, Item, Order, User},
    response::{ApiResponse, Meta},
    routes::{carts, health, items, orders, params, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::register,
        users::login,
        users::list,
        carts::add_to_cart,
        carts::get_cart,
        carts::list_carts,
        orders::create_order,
        orders::list_orders,
        items::list_items
    ),
    components(
        schemas(
            User,
            Item,
            Cart,
            CartItem,
            Order,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UserList,
            AddToCartRequest,
            CartLine,
            CartWithItems,
            CartOverview,
            CartOverviewList,
            OrderLine,
            OrderWithItems,
            OrderList,
            ItemList,
            params::Pagination,
            Meta,
            ApiResponse<User>,
            ApiResponse<CartItem>,
            ApiResponse<CartWithItems>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<ItemList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Registration, login and user listing"),
        (name = "Carts", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Items", description = "Catalog endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
