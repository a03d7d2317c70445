//! The closed set of assistant agents.

use std::fmt;

use crate::tools::ToolKind;

/// Assistant agents that can take part in a group chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    ProductRecommendation,
    OrderStatus,
    DamageDefectStatus,
    ImageExplainer,
    PackageShippingStatus,
    ProductShippingStatus,
    OcrExtraction,
    DbRetrieval,
    OrderVerification,
}

const PRODUCT_RECOMMENDATION_PROMPT: &str = "I recommend products based on customer preferences. \
After recommendation, I will ask if the customer wants to purchase the product before saving the customer and order details. \
I will make sure about below details before I take any action\n\
- if customer give the product name like shirt, shorts etc.. then I will use keyword search in product name to find the relevant data.\n\
- if the customer ask for product of specific size like large, small or medium then I will search for first letter of that in capital letter in size column.";

const DAMAGE_DEFECT_STATUS_PROMPT: &str = "For the customer queries related to defective product or damaged package, \
if user have not given the image url or order id then I will ask for the order id or image url. \
If user enters the order id then I will retrieve the image url corresponding to that orderid from database, \
otherwise proceed with provided image url from input, and give the image url in the format of \"<img {image_url}>\". \
Here image_url is the url of the image.";

const IMAGE_EXPLAINER_PROMPT: &str = "For any request related to condition, status or description of damaged package or defective product I will give the detailed description. \
If image is not provided then I will ask for image or orderid and then I will give the detailed description of the image. \
If image is not of package or any product then I will reply with that along with the image url and description that it is out of scope.";

const PACKAGE_SHIPPING_STATUS_PROMPT: &str = "If the image is of package then you will use the description of the image from image_explainer agent \
and give the final one decision out of below along with its description as well as the image url in proper markdown format.\n\
1) Refund: if package seems seriously damaged then you will provide the refund to the customer.\n\
2) Replace: if package is having water exposure observed then you will replace the package.\n\
3) Escalate to human agent: if there is no defect or damage in the package then you will escalate to human agent for further assistance.";

const PRODUCT_SHIPPING_STATUS_PROMPT: &str = "If the image is of product then you will use the description of the image from image_explainer agent \
and give the final one decision out of below along with its description as well as the image url in proper markdown format.\n\
1) Refund: if product seems defective then you will provide the refund to the customer.\n\
2) Escalate to human agent: if there is no defect observed in the product then you will escalate to human agent for further assistance.";

const ORDER_VERIFICATION_PROMPT: &str = "Verify the order details extracted from OCR by retrieving the total price from the database for the given order ID. \
Then, compare it with the billed price provided from the OCR data, and classify the order as follows:\n\n\
- Refund if the billed price does not match the total price in the database.\n\
- Decline if the billed price matches the total price in the database.\n\
- Escalate if the order ID is not found in the database.\n\n\
Provide a clear justification with your final classification.";

impl AgentRole {
    pub const ALL: &'static [Self] = &[
        Self::ProductRecommendation,
        Self::OrderStatus,
        Self::DamageDefectStatus,
        Self::ImageExplainer,
        Self::PackageShippingStatus,
        Self::ProductShippingStatus,
        Self::OcrExtraction,
        Self::DbRetrieval,
        Self::OrderVerification,
    ];

    /// Speaker name shown to the client and to the other agents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ProductRecommendation => "product_recommendation_agent",
            Self::OrderStatus => "order_status_agent",
            Self::DamageDefectStatus => "damage_defective_status_agent",
            Self::ImageExplainer => "image_explainer",
            Self::PackageShippingStatus => "package_shipping_status_agent",
            Self::ProductShippingStatus => "product_shipping_status_agent",
            Self::OcrExtraction => "OCRExtractionAgent",
            Self::DbRetrieval => "DBRetrievalAgent",
            Self::OrderVerification => "OrderVerificationAgent",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|role| role.name() == name)
    }

    /// One-line summary the speaker selector uses to route turns.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ProductRecommendation => {
                "Recommends products based on customer preferences and performs the purchase if the customer wants to buy."
            },
            Self::OrderStatus => {
                "Retrieves order details based on the order ID provided by the customer; asks for it if not provided."
            },
            Self::DamageDefectStatus => {
                "Gets the image url for a damaged package or defective product from the order id for further analysis."
            },
            Self::ImageExplainer => {
                "For any request related to condition, status or description of an image, gives the detailed description of that image."
            },
            Self::PackageShippingStatus => "Gives the decision for a damaged package.",
            Self::ProductShippingStatus => "Gives the decision for a defective product.",
            Self::OcrExtraction => "Extracts order details from an invoice image.",
            Self::DbRetrieval => "Retrieves the total price from the database for a given order ID.",
            Self::OrderVerification => {
                "Classifies the order as Refund, Decline or Escalate by comparing billed and stored prices."
            },
        }
    }

    #[must_use]
    pub const fn system_message(self) -> &'static str {
        match self {
            Self::ProductRecommendation => PRODUCT_RECOMMENDATION_PROMPT,
            Self::OrderStatus => {
                "I retrieve order details based on the order ID provided by the customer. Return the response in proper format by summarizing the data."
            },
            Self::DamageDefectStatus => DAMAGE_DEFECT_STATUS_PROMPT,
            Self::ImageExplainer => IMAGE_EXPLAINER_PROMPT,
            Self::PackageShippingStatus => PACKAGE_SHIPPING_STATUS_PROMPT,
            Self::ProductShippingStatus => PRODUCT_SHIPPING_STATUS_PROMPT,
            Self::OcrExtraction => {
                "Extracts order details (e.g., Order ID, Quantity, Price, and Billed Price) from OCR image."
            },
            Self::DbRetrieval => "Retrieve the total price from the database for a given order ID.",
            Self::OrderVerification => ORDER_VERIFICATION_PROMPT,
        }
    }

    /// Tools this agent may call.
    #[must_use]
    pub const fn tools(self) -> &'static [ToolKind] {
        match self {
            Self::ProductRecommendation => &[ToolKind::RecommendProduct, ToolKind::BuyProduct],
            Self::OrderStatus => &[ToolKind::GetOrderStatus],
            Self::DamageDefectStatus => {
                &[ToolKind::FetchDamagedPackageUrl, ToolKind::FetchDefectProductUrl]
            },
            Self::DbRetrieval => &[ToolKind::GetTotalprice],
            Self::ImageExplainer
            | Self::PackageShippingStatus
            | Self::ProductShippingStatus
            | Self::OcrExtraction
            | Self::OrderVerification => &[],
        }
    }

    #[must_use]
    pub fn can_call(self, tool: ToolKind) -> bool {
        self.tools().contains(&tool)
    }

    /// Whether the agent receives images as content parts instead of captions.
    #[must_use]
    pub const fn is_multimodal(self) -> bool {
        matches!(self, Self::ImageExplainer | Self::OcrExtraction)
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
