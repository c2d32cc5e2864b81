// Mirrors migrations/2016-01-13-000000_create_orders/up.sql.
//
// Money columns are declared NUMERIC/MONEY in SQL and carried as decimal text;
// SQLite's numeric affinity stores them as numbers.

diesel::table! {
    #[sql_name = "Order"]
    orders (id) {
        id -> Integer,
        #[sql_name = "orderDate"]
        order_date -> Date,
        total -> Text,
    }
}

diesel::table! {
    #[sql_name = "LineItem"]
    line_items (name, order_id) {
        name -> Text,
        #[sql_name = "unitPrice"]
        unit_price -> Text,
        quantity -> Integer,
        #[sql_name = "orderId"]
        order_id -> Integer,
    }
}

diesel::allow_tables_to_appear_in_same_query!(line_items, orders,);
