//! Built-in plans
//!
//! The one-off migrations for the storefront (`my-user`) and admin
//! (`my-admin`) Angular apps, expressed as data. Paths are relative to the
//! directory holding both projects.

use crate::rewrite::plan::{FileRule, ImportRule, Plan, Replacement};

const USER_APP: &str = "my-user/src/app";
const ADMIN_APP: &str = "my-admin/src/app";

const ENVIRONMENT_IMPORT: &str = "import { environment } from '../../environments/environment';";
const ENVIRONMENT_MARKER: &str = "environment";
const HTTP_CLIENT_IMPORT: &str = "import { HttpClient } from '@angular/common/http';";

const PAGINATION_FILES: &[&str] = &[
    "product/product-list/product-list.ts",
    "product/product-detail/product-detail.ts",
    "home/home.ts",
    "header/header.ts",
    "account/wishlist/wishlist.ts",
];

type Table = &'static [(&'static str, &'static str)];

const PROMOTION_URLS: Table = &[
    (
        r#"this.http.get<any>('http://localhost:3000/api/products/metadata/categories')"#,
        r#"this.http.get<any>(`${environment.apiUrl}/products/metadata/categories`)"#,
    ),
    (
        r#"this.http.get<any>('http://localhost:3000/api/products/metadata/subcategories')"#,
        r#"this.http.get<any>(`${environment.apiUrl}/products/metadata/subcategories`)"#,
    ),
    (
        r#"this.http.get<any>('http://localhost:3000/api/products/metadata/brands')"#,
        r#"this.http.get<any>(`${environment.apiUrl}/products/metadata/brands`)"#,
    ),
    (
        r#"this.http.get<any>('http://localhost:3000/api/products/metadata/products')"#,
        r#"this.http.get<any>(`${environment.apiUrl}/products/metadata/products`)"#,
    ),
    (
        r#"this.http.get<any>(`http://localhost:3000/api/promotion-targets/${promotionId}`)"#,
        r#"this.http.get<any>(`${environment.apiUrl}/promotion-targets/${promotionId}`)"#,
    ),
    (
        r#"this.http.put(`http://localhost:3000/api/promotions/${update.id}`"#,
        r#"this.http.put(`${environment.apiUrl}/promotions/${update.id}`"#,
    ),
    (
        r#"return this.http.delete(`http://localhost:3000/api/promotions/${promotionId}`)"#,
        r#"return this.http.delete(`${environment.apiUrl}/promotions/${promotionId}`)"#,
    ),
    (
        r#"this.http.post('http://localhost:3000/api/promotion-targets'"#,
        r#"this.http.post(`${environment.apiUrl}/promotion-targets`"#,
    ),
    (
        r#"this.http.post('http://localhost:3000/api/promotions'"#,
        r#"this.http.post(`${environment.apiUrl}/promotions`"#,
    ),
    (
        r#"console.log('📤 [Update Promotion] Sending PUT request to:', `http://localhost:3000/api/promotions/${identifier}`);"#,
        r#"console.log('📤 [Update Promotion] Sending PUT request to:', `${environment.apiUrl}/promotions/${identifier}`);"#,
    ),
    (
        r#"this.http.put(`http://localhost:3000/api/promotions/${identifier}`"#,
        r#"this.http.put(`${environment.apiUrl}/promotions/${identifier}`"#,
    ),
    (
        r#"this.http.delete(`http://localhost:3000/api/promotion-targets/${promotionId}`)"#,
        r#"this.http.delete(`${environment.apiUrl}/promotion-targets/${promotionId}`)"#,
    ),
    (
        r#"this.http.put<any>(`http://localhost:3000/api/promotions/${promotionId}`"#,
        r#"this.http.put<any>(`${environment.apiUrl}/promotions/${promotionId}`"#,
    ),
    (
        r#"this.http.put<any>(`http://localhost:3000/api/promotion-targets/${promotionId}`"#,
        r#"this.http.put<any>(`${environment.apiUrl}/promotion-targets/${promotionId}`"#,
    ),
    (
        r#"this.http.post<any>(`http://localhost:3000/api/promotion-targets`"#,
        r#"this.http.post<any>(`${environment.apiUrl}/promotion-targets`"#,
    ),
];

const ORDER_DETAIL_URLS: Table = &[(
    r#"this.http.get<any>('http://localhost:3000/api/tree_complete')"#,
    r#"this.http.get<any>(`${environment.apiUrl}/tree_complete`)"#,
)];

const LAYOUT_URLS: Table = &[
    (
        r#"this.http.get<any>(`http://localhost:3000/api/orders/${notification.orderId}`)"#,
        r#"this.http.get<any>(`${environment.apiUrl}/orders/${notification.orderId}`)"#,
    ),
    (
        r#"this.http.get<any>('http://localhost:3000/api/orders')"#,
        r#"this.http.get<any>(`${environment.apiUrl}/orders`)"#,
    ),
];

const CUSTOMER_DETAIL_URLS: Table = &[
    (
        r#"this.http.get<any>(`http://localhost:3000/api/users/customer/${customerID}`)"#,
        r#"this.http.get<any>(`${environment.apiUrl}/users/customer/${customerID}`)"#,
    ),
    (
        r#"this.http.get<any>(`http://localhost:3000/api/orders/customer/${customerID}`)"#,
        r#"this.http.get<any>(`${environment.apiUrl}/orders/customer/${customerID}`)"#,
    ),
    (
        r#"this.http.get<any>(`http://localhost:3000/api/address/${customerID}`)"#,
        r#"this.http.get<any>(`${environment.apiUrl}/address/${customerID}`)"#,
    ),
    (
        r#"this.http.put(`http://localhost:3000/api/users/customer/${customerID}`"#,
        r#"this.http.put(`${environment.apiUrl}/users/customer/${customerID}`"#,
    ),
];

const CONSULTATION_MANAGE_URLS: Table = &[(
    r#"this.http.get<any>('http://localhost:3000/api/consultations')"#,
    r#"this.http.get<any>(`${environment.apiUrl}/consultations`)"#,
)];

const CONSULTATION_DETAIL_URLS: Table = &[
    (
        r#"this.http.get<any>(`http://localhost:3000/api/consultations/${this.sku}`)"#,
        r#"this.http.get<any>(`${environment.apiUrl}/consultations/${this.sku}`)"#,
    ),
    (
        r#"      `http://localhost:3000/api/consultations/${this.consultation.sku}/answer/${this.selectedQuestion._id}`,"#,
        r#"      `${environment.apiUrl}/consultations/${this.consultation.sku}/answer/${this.selectedQuestion._id}`,"#,
    ),
    (
        r#"      `http://localhost:3000/api/consultations/${this.consultation.sku}/question/${question._id}`"#,
        r#"      `${environment.apiUrl}/consultations/${this.consultation.sku}/question/${question._id}`"#,
    ),
];

const BLOG_URLS: Table = &[(
    r#"this.http.get<any>(`http://localhost:3000/api/blogs/${blogId}`)"#,
    r#"this.http.get<any>(`${environment.apiUrl}/blogs/${blogId}`)"#,
)];

const ADMIN_COMPONENTS: &[(&str, Table)] = &[
    ("promotionmanage/promotionmanage.ts", PROMOTION_URLS),
    ("orderdetail/orderdetail.ts", ORDER_DETAIL_URLS),
    ("layout/layout.ts", LAYOUT_URLS),
    ("customerdetail/customerdetail.ts", CUSTOMER_DETAIL_URLS),
    ("consultationmanage/consultationmanage.ts", CONSULTATION_MANAGE_URLS),
    ("consultationdetail/consultationdetail.ts", CONSULTATION_DETAIL_URLS),
    ("blogmanage/blog.ts", BLOG_URLS),
];

/// (file, field initialiser, replacement, import anchor line)
const ADMIN_SERVICES: &[(&str, &str, &str, &str)] = &[
    (
        "services/auth.service.ts",
        "private baseUrl = 'http://localhost:3000/api';",
        "private baseUrl = environment.apiUrl;",
        "import { map, catchError, timeout } from 'rxjs/operators';",
    ),
    (
        "services/api.service.ts",
        "private baseUrl = 'http://localhost:3000/api'; // Thay đổi URL này theo backend của bạn",
        "private baseUrl = environment.apiUrl;",
        "import { HttpClient, HttpHeaders } from '@angular/common/http';",
    ),
    (
        "services/notification.service.ts",
        "private apiUrl = 'http://localhost:3000/api/notifications';",
        "private apiUrl = `${environment.apiUrl}/notifications`;",
        "import { BehaviorSubject, Observable, interval } from 'rxjs';",
    ),
];

fn environment_import(after: &str) -> ImportRule {
    ImportRule {
        after: after.to_string(),
        line: ENVIRONMENT_IMPORT.to_string(),
        marker: ENVIRONMENT_MARKER.to_string(),
    }
}

fn replacements(table: Table) -> Vec<Replacement> {
    table
        .iter()
        .map(|(from, to)| Replacement::new(*from, *to))
        .collect()
}

fn pagination_calls() -> Plan {
    Plan {
        name: "pagination-calls".to_string(),
        description: "Rename getAllProducts() to getAllProductsNoPagination() in the storefront"
            .to_string(),
        files: PAGINATION_FILES
            .iter()
            .map(|file| {
                FileRule::new(
                    format!("{}/{}", USER_APP, file),
                    vec![Replacement::new(
                        "getAllProducts()",
                        "getAllProductsNoPagination()",
                    )],
                )
            })
            .collect(),
    }
}

fn admin_components() -> Plan {
    Plan {
        name: "admin-components".to_string(),
        description: "Point admin component HTTP calls at environment.apiUrl".to_string(),
        files: ADMIN_COMPONENTS
            .iter()
            .map(|(file, table)| {
                FileRule::new(format!("{}/{}", ADMIN_APP, file), replacements(table))
                    .with_import(environment_import(HTTP_CLIENT_IMPORT))
            })
            .collect(),
    }
}

fn admin_services() -> Plan {
    Plan {
        name: "admin-services".to_string(),
        description: "Point admin service base URLs at environment.apiUrl".to_string(),
        files: ADMIN_SERVICES
            .iter()
            .map(|(file, from, to, anchor)| {
                FileRule::new(
                    format!("{}/{}", ADMIN_APP, file),
                    vec![Replacement::new(*from, *to)],
                )
                .with_import(environment_import(anchor))
            })
            .collect(),
    }
}

/// All built-in plans, in listing order
pub fn all() -> Vec<Plan> {
    vec![pagination_calls(), admin_components(), admin_services()]
}

/// Look up a built-in plan by name
pub fn find(name: &str) -> Option<Plan> {
    all().into_iter().find(|plan| plan.name == name)
}
