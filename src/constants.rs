// Query parameters injected while signing.
pub const SERVICE: &str = "Service";
pub const AWS_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const ASSOCIATE_TAG: &str = "AssociateTag";
pub const TIMESTAMP: &str = "Timestamp";
pub const SIGNATURE: &str = "Signature";

// Service identifier carried in every signed request.
pub const AWS_ECOMMERCE_SERVICE: &str = "AWSECommerceService";

// Default endpoint of the product advertising service.
//
// Other marketplaces use their own hosts, e.g. `webservices.amazon.co.uk`.
pub const DEFAULT_ENDPOINT: &str = "webservices.amazon.com";
pub const DEFAULT_URI: &str = "/onca/xml";

// Env values used by the product advertising service.
pub const AMAZON_ACCESS_KEY: &str = "AMAZON_ACCESS_KEY";
pub const AMAZON_SECRET_KEY: &str = "AMAZON_SECRET_KEY";
pub const AMAZON_ASSOCIATE_TAG: &str = "AMAZON_ASSOCIATE_TAG";

// Error codes returned by the provider.
pub const REQUEST_THROTTLED: &str = "RequestThrottled";
pub const INVALID_ACCOUNT: &str = "AWS.InvalidAccount";
pub const MISSING_PARAMETERS: &str = "AWS.MissingParameters";
