mod helpers;
mod router_test;
mod shopping_list_test;
mod subscription_test;
