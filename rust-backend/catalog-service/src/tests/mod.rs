mod contact_routes;
