//! Catalog Toolkit - Graphical User Interface
//!
//! Browses a remote product catalog as a paginated, filterable, sortable
//! grid of cards, with a detail panel, create/edit forms, and CSV export of
//! the current view.

use catalog_toolkit::api::{CatalogClient, Category, Product, ProductDraft};
use catalog_toolkit::export;
use catalog_toolkit::images::{first_valid_image, is_valid_url, parse_image_list};
use catalog_toolkit::pipeline::{page_window, FilterCriteria, PageView, SortKey};
use catalog_toolkit::store::CatalogStore;
use iced::widget::{button, column, container, pick_list, row, rule, scrollable, text, text_input};
use iced::{Center, Element, Fill, Task, Theme};
use std::path::{Path, PathBuf};

/// Page-size choices offered in the per-page selector.
const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// Cards per grid row.
const GRID_COLUMNS: usize = 4;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(App::new, App::update, App::view)
        .theme(App::theme)
        .centered()
        .run()
}

// ============================================================================
// App State
// ============================================================================

/// Startup lifecycle. Both initial fetches must land before the catalog is
/// usable; either failure shows the error panel with no partial rendering.
#[derive(Debug, Clone)]
enum Phase {
    Loading,
    Ready,
    Failed(String),
}

/// Which panel occupies the body: the grid, one product's detail, or a form.
#[derive(Debug, Clone)]
enum Panel {
    Grid,
    Detail(u64),
    Edit(u64, ProductForm),
    Create(ProductForm),
}

/// Raw create/edit form inputs, parsed into a draft on submit.
#[derive(Debug, Clone, Default)]
struct ProductForm {
    title: String,
    price: String,
    description: String,
    category: Option<CategoryChoice>,
    images: String,
}

impl ProductForm {
    fn from_product(product: &Product) -> Self {
        ProductForm {
            title: product.title.clone(),
            price: product.price.to_string(),
            description: product.description.clone().unwrap_or_default(),
            category: Some(CategoryChoice::from(&product.category)),
            images: product.images.join(", "),
        }
    }

    /// Required-field checks run here, before any network call. Invalid
    /// image URLs are dropped and an empty list falls back to a single
    /// placeholder rather than failing the submission.
    fn to_draft(&self) -> Result<ProductDraft, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.".to_string());
        }
        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| "Price must be a number.".to_string())?;
        if price < 0.0 {
            return Err("Price must be non-negative.".to_string());
        }
        let category = self
            .category
            .as_ref()
            .ok_or_else(|| "Category is required.".to_string())?;

        let description = self.description.trim();
        Ok(ProductDraft {
            title: title.to_string(),
            price,
            description: if description.is_empty() {
                "No description".to_string()
            } else {
                description.to_string()
            },
            category_id: category.id,
            images: parse_image_list(&self.images),
        })
    }
}

/// Category entry for the pick lists.
#[derive(Debug, Clone, PartialEq)]
struct CategoryChoice {
    id: u64,
    name: String,
}

impl From<&Category> for CategoryChoice {
    fn from(category: &Category) -> Self {
        CategoryChoice {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

impl std::fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Category filter including the "all" choice the form pick list lacks.
#[derive(Debug, Clone, PartialEq)]
enum CategoryFilter {
    All,
    One(CategoryChoice),
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All categories"),
            CategoryFilter::One(choice) => f.write_str(&choice.name),
        }
    }
}

/// Outcome banner for create/update/export results.
#[derive(Debug, Clone)]
struct Notice {
    message: String,
    is_error: bool,
}

impl Notice {
    fn info(message: String) -> Self {
        Notice {
            message,
            is_error: false,
        }
    }

    fn error(message: String) -> Self {
        Notice {
            message,
            is_error: true,
        }
    }
}

struct App {
    client: CatalogClient,
    phase: Phase,
    store: CatalogStore,
    /// Pipeline output, refreshed after every state mutation and before any
    /// render reads it.
    view: PageView,

    // Raw filter inputs
    search_input: String,
    min_price_input: String,
    max_price_input: String,
    category_filter: CategoryFilter,
    category_filters: Vec<CategoryFilter>,
    category_choices: Vec<CategoryChoice>,

    panel: Panel,
    notice: Option<Notice>,
    /// A create/update request is in flight.
    busy: bool,
}

impl App {
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn new() -> (Self, Task<Message>) {
        let app = App {
            client: CatalogClient::new(),
            phase: Phase::Loading,
            store: CatalogStore::new(),
            view: PageView::default(),
            search_input: String::new(),
            min_price_input: String::new(),
            max_price_input: String::new(),
            category_filter: CategoryFilter::All,
            category_filters: vec![CategoryFilter::All],
            category_choices: Vec::new(),
            panel: Panel::Grid,
            notice: None,
            busy: false,
        };
        let load = app.start_load();
        (app, load)
    }

    /// Issue the two startup fetches concurrently; either failure fails the
    /// whole initialization.
    fn start_load(&self) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(
            async move {
                futures::future::try_join(client.list_products(), client.list_categories())
                    .await
                    .map_err(|e| e.to_string())
            },
            Message::Loaded,
        )
    }

    /// Re-run the pipeline so the next render sees current state.
    fn refresh(&mut self) {
        self.view = self.store.current_view();
    }

    /// Rebuild criteria from the raw inputs, reset to page 1, re-render.
    fn apply_filters(&mut self) -> Task<Message> {
        let category_id = match &self.category_filter {
            CategoryFilter::All => None,
            CategoryFilter::One(choice) => Some(choice.id),
        };
        self.store.set_criteria(FilterCriteria::from_inputs(
            &self.search_input,
            category_id,
            &self.min_price_input,
            &self.max_price_input,
        ));
        self.refresh();
        scroll_to_grid_top()
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone)]
enum Message {
    // Startup
    Loaded(Result<(Vec<Product>, Vec<Category>), String>),
    Retry,

    // Filters / sort / pagination
    SearchChanged(String),
    MinPriceChanged(String),
    MaxPriceChanged(String),
    CategorySelected(CategoryFilter),
    SortSelected(SortKey),
    PageSizeSelected(usize),
    GoToPage(usize),

    // Panels
    ShowDetail(u64),
    ShowEdit(u64),
    ShowCreate,
    BackToGrid,

    // Form fields
    FormTitleChanged(String),
    FormPriceChanged(String),
    FormDescriptionChanged(String),
    FormCategorySelected(CategoryChoice),
    FormImagesChanged(String),
    FormSubmitted,
    CreateFinished(Result<Product, String>),
    UpdateFinished(Result<Product, String>),

    // Export
    ExportRequested,
    ExportTargetSelected(Option<PathBuf>),

    DismissNotice,
}

// ============================================================================
// Update
// ============================================================================

impl App {
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // -- Startup --
            Message::Loaded(Ok((products, categories))) => {
                log::info!(
                    "loaded {} products and {} categories",
                    products.len(),
                    categories.len()
                );
                self.category_choices =
                    categories.iter().map(CategoryChoice::from).collect();
                self.category_filters = std::iter::once(CategoryFilter::All)
                    .chain(
                        self.category_choices
                            .iter()
                            .cloned()
                            .map(CategoryFilter::One),
                    )
                    .collect();
                self.store.load(products, categories);
                self.refresh();
                self.phase = Phase::Ready;
                Task::none()
            }
            Message::Loaded(Err(error)) => {
                log::error!("startup fetch failed: {}", error);
                self.phase = Phase::Failed(error);
                Task::none()
            }
            Message::Retry => {
                self.phase = Phase::Loading;
                self.start_load()
            }

            // -- Filters / sort / pagination --
            Message::SearchChanged(value) => {
                self.search_input = value;
                self.apply_filters()
            }
            Message::MinPriceChanged(value) => {
                self.min_price_input = value;
                self.apply_filters()
            }
            Message::MaxPriceChanged(value) => {
                self.max_price_input = value;
                self.apply_filters()
            }
            Message::CategorySelected(filter) => {
                self.category_filter = filter;
                self.apply_filters()
            }
            Message::SortSelected(sort) => {
                self.store.set_sort(sort);
                self.refresh();
                scroll_to_grid_top()
            }
            Message::PageSizeSelected(page_size) => {
                self.store.set_page_size(page_size);
                self.refresh();
                Task::none()
            }
            Message::GoToPage(page) => {
                self.store.set_page(page);
                self.refresh();
                scroll_to_grid_top()
            }

            // -- Panels --
            Message::ShowDetail(id) => {
                self.panel = Panel::Detail(id);
                Task::none()
            }
            Message::ShowEdit(id) => {
                if let Some(product) = self.store.product(id) {
                    self.panel = Panel::Edit(id, ProductForm::from_product(product));
                }
                Task::none()
            }
            Message::ShowCreate => {
                self.panel = Panel::Create(ProductForm::default());
                Task::none()
            }
            Message::BackToGrid => {
                self.panel = Panel::Grid;
                Task::none()
            }

            // -- Form fields --
            Message::FormTitleChanged(value) => {
                if let Panel::Edit(_, form) | Panel::Create(form) = &mut self.panel {
                    form.title = value;
                }
                Task::none()
            }
            Message::FormPriceChanged(value) => {
                if let Panel::Edit(_, form) | Panel::Create(form) = &mut self.panel {
                    form.price = value;
                }
                Task::none()
            }
            Message::FormDescriptionChanged(value) => {
                if let Panel::Edit(_, form) | Panel::Create(form) = &mut self.panel {
                    form.description = value;
                }
                Task::none()
            }
            Message::FormCategorySelected(choice) => {
                if let Panel::Edit(_, form) | Panel::Create(form) = &mut self.panel {
                    form.category = Some(choice);
                }
                Task::none()
            }
            Message::FormImagesChanged(value) => {
                if let Panel::Edit(_, form) | Panel::Create(form) = &mut self.panel {
                    form.images = value;
                }
                Task::none()
            }

            Message::FormSubmitted => {
                let (existing, form) = match &self.panel {
                    Panel::Edit(id, form) => (Some(*id), form.clone()),
                    Panel::Create(form) => (None, form.clone()),
                    _ => return Task::none(),
                };
                // Client-side validation: no network call on failure, state
                // untouched.
                let draft = match form.to_draft() {
                    Ok(draft) => draft,
                    Err(message) => {
                        self.notice = Some(Notice::error(message));
                        return Task::none();
                    }
                };
                self.busy = true;
                let client = self.client.clone();
                match existing {
                    Some(id) => Task::perform(
                        async move {
                            client
                                .update_product(id, &draft)
                                .await
                                .map_err(|e| e.to_string())
                        },
                        Message::UpdateFinished,
                    ),
                    None => Task::perform(
                        async move {
                            client
                                .create_product(&draft)
                                .await
                                .map_err(|e| e.to_string())
                        },
                        Message::CreateFinished,
                    ),
                }
            }
            Message::CreateFinished(Ok(product)) => {
                self.busy = false;
                log::info!("created product {}", product.id);
                let id = product.id;
                self.store.insert_created(product);
                self.refresh();
                self.panel = Panel::Grid;
                self.notice = Some(Notice::info(format!("Product {} created.", id)));
                scroll_to_grid_top()
            }
            Message::CreateFinished(Err(error)) => {
                self.busy = false;
                self.notice = Some(Notice::error(format!("Create failed: {}", error)));
                Task::none()
            }
            Message::UpdateFinished(Ok(product)) => {
                self.busy = false;
                log::info!("updated product {}", product.id);
                let id = product.id;
                self.store.apply_update(product);
                self.refresh();
                self.panel = Panel::Detail(id);
                self.notice = Some(Notice::info(format!("Product {} updated.", id)));
                Task::none()
            }
            Message::UpdateFinished(Err(error)) => {
                self.busy = false;
                self.notice = Some(Notice::error(format!("Update failed: {}", error)));
                Task::none()
            }

            // -- Export --
            Message::ExportRequested => {
                if self.store.filtered().is_empty() {
                    self.notice =
                        Some(Notice::error("There are no products to export.".to_string()));
                    return Task::none();
                }
                let filename = export::export_filename(chrono::Local::now().date_naive());
                Task::perform(
                    async move {
                        let file = rfd::AsyncFileDialog::new()
                            .add_filter("CSV files", &["csv"])
                            .set_file_name(filename)
                            .save_file()
                            .await;
                        file.map(|f| f.path().to_path_buf())
                    },
                    Message::ExportTargetSelected,
                )
            }
            Message::ExportTargetSelected(Some(path)) => {
                let rows = self.store.filtered();
                self.notice = Some(match write_csv(&rows, &path) {
                    Ok(count) => {
                        Notice::info(format!("Exported {} products to {}", count, path.display()))
                    }
                    Err(error) => Notice::error(format!("Export failed: {}", error)),
                });
                Task::none()
            }
            Message::ExportTargetSelected(None) => Task::none(),

            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }
}

// ============================================================================
// View
// ============================================================================

impl App {
    fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Catalog Browser").size(24),
            text("remote product catalog").size(13).color(muted()),
        ]
        .spacing(14)
        .align_y(Center);

        let notice_bar: Element<'_, Message> = match &self.notice {
            Some(notice) => row![
                text(&notice.message)
                    .size(13)
                    .color(if notice.is_error { error_red() } else { ok_green() })
                    .width(Fill),
                button(text("Dismiss").size(12))
                    .on_press(Message::DismissNotice)
                    .style(button::text),
            ]
            .spacing(10)
            .align_y(Center)
            .into(),
            None => column![].into(),
        };

        let body: Element<'_, Message> = match &self.phase {
            Phase::Loading => container(text("Loading catalog...").size(16))
                .padding(40)
                .into(),
            Phase::Failed(error) => self.view_load_failure(error),
            Phase::Ready => match &self.panel {
                Panel::Grid => self.view_grid(),
                Panel::Detail(id) => self.view_detail(*id),
                Panel::Edit(_, form) => self.view_form("Edit Product", form),
                Panel::Create(form) => self.view_form("Create Product", form),
            },
        };

        column![
            container(column![header, notice_bar].spacing(6)).padding([10, 20]),
            rule::horizontal(1),
            container(body).padding(20).width(Fill).height(Fill),
        ]
        .into()
    }

    // -- Startup failure panel --
    fn view_load_failure<'a>(&'a self, error: &'a str) -> Element<'a, Message> {
        column![
            text("Could not load the catalog.").size(18),
            text(error).size(13).color(muted()),
            button(text("Retry").size(13)).on_press(Message::Retry),
        ]
        .spacing(12)
        .into()
    }

    // -- Grid panel --
    fn view_grid(&self) -> Element<'_, Message> {
        let filters = column![
            row![
                text_input("Search titles...", &self.search_input)
                    .on_input(Message::SearchChanged)
                    .width(Fill),
                pick_list(
                    self.category_filters.clone(),
                    Some(self.category_filter.clone()),
                    Message::CategorySelected,
                ),
            ]
            .spacing(10)
            .align_y(Center),
            row![
                text("Price").size(13),
                text_input("min", &self.min_price_input)
                    .on_input(Message::MinPriceChanged)
                    .width(80),
                text("to").size(13),
                text_input("max", &self.max_price_input)
                    .on_input(Message::MaxPriceChanged)
                    .width(80),
                text("Sort").size(13),
                pick_list(SortKey::ALL, Some(self.store.sort()), Message::SortSelected),
                text("Per page").size(13),
                pick_list(
                    PAGE_SIZES,
                    Some(self.store.page_size()),
                    Message::PageSizeSelected,
                ),
            ]
            .spacing(10)
            .align_y(Center),
        ]
        .spacing(8);

        let toolbar = row![
            text(format!("{} products", self.view.total))
                .size(13)
                .width(Fill),
            button(text("New Product").size(13))
                .on_press(Message::ShowCreate)
                .style(button::primary),
            button(text("Export CSV").size(13))
                .on_press(Message::ExportRequested)
                .style(button::secondary),
        ]
        .spacing(10)
        .align_y(Center);

        let grid: Element<'_, Message> = if self.view.visible.is_empty() {
            container(
                text("No products match the current filters.")
                    .size(14)
                    .color(muted()),
            )
            .padding(40)
            .into()
        } else {
            let mut rows = column![].spacing(12);
            for chunk in self.view.visible.chunks(GRID_COLUMNS) {
                let mut cards = row![].spacing(12);
                for product in chunk {
                    cards = cards.push(self.product_card(product));
                }
                rows = rows.push(cards);
            }
            scrollable(container(rows).padding([0, 4]))
                .id(grid_id())
                .height(Fill)
                .into()
        };

        column![filters, toolbar, grid, self.pagination()]
            .spacing(12)
            .into()
    }

    /// One product card: id badge, image line, category icon, title,
    /// truncated description, price.
    fn product_card<'a>(&'a self, product: &'a Product) -> Element<'a, Message> {
        let description = product.description.as_deref().unwrap_or("No description");

        let body = column![
            text(format!("ID: {}", product.id)).size(11).color(muted()),
            text(truncate(first_valid_image(&product.images), 38))
                .size(10)
                .color(muted()),
            text(format!(
                "{} {}",
                category_icon(&product.category.name),
                product.category.name
            ))
            .size(12),
            text(truncate(&product.title, 48)).size(15),
            text(truncate(description, 80)).size(12).color(muted()),
            text(format!("${:.2}", product.price)).size(14),
        ]
        .spacing(4)
        .width(220);

        button(body)
            .on_press(Message::ShowDetail(product.id))
            .style(button::secondary)
            .into()
    }

    /// Pagination controls: prev/next disabled at the boundaries, at most
    /// five page buttons centered on the current page.
    fn pagination(&self) -> Element<'_, Message> {
        let view = &self.view;
        if view.total_pages <= 1 {
            return column![].into();
        }

        let (first, last) = page_window(view.page, view.total_pages);

        let mut controls = row![].spacing(6).align_y(Center);
        controls = controls.push(
            button(text("< Prev").size(13))
                .on_press_maybe((view.page > 1).then(|| Message::GoToPage(view.page - 1)))
                .style(button::secondary),
        );
        for page in first..=last {
            let btn = button(text(page.to_string()).size(13));
            let btn = if page == view.page {
                btn.style(button::primary)
            } else {
                btn.on_press(Message::GoToPage(page)).style(button::secondary)
            };
            controls = controls.push(btn);
        }
        controls = controls.push(
            button(text("Next >").size(13))
                .on_press_maybe(
                    (view.page < view.total_pages).then(|| Message::GoToPage(view.page + 1)),
                )
                .style(button::secondary),
        );

        controls.into()
    }

    // -- Detail panel --
    fn view_detail(&self, id: u64) -> Element<'_, Message> {
        let Some(product) = self.store.product(id) else {
            return column![
                text("Product not found.").size(14),
                button(text("< Back").size(13)).on_press(Message::BackToGrid),
            ]
            .spacing(12)
            .into();
        };

        let mut images = column![].spacing(2);
        if product.images.is_empty() {
            images = images.push(
                text(first_valid_image(&product.images))
                    .size(12)
                    .color(muted()),
            );
        } else {
            for url in &product.images {
                if is_valid_url(url) {
                    images = images.push(text(url.as_str()).size(12));
                } else {
                    images = images.push(
                        text(format!("{} (invalid, placeholder shown)", url))
                            .size(12)
                            .color(muted()),
                    );
                }
            }
        }

        column![
            row![
                button(text("< Back").size(13))
                    .on_press(Message::BackToGrid)
                    .style(button::secondary),
                button(text("Edit").size(13))
                    .on_press(Message::ShowEdit(id))
                    .style(button::primary),
            ]
            .spacing(10),
            text(&product.title).size(24),
            text(format!("ID: {}", product.id)).size(12).color(muted()),
            rule::horizontal(1),
            text(format!("Price: ${:.2}", product.price)).size(14),
            text(format!(
                "Category: {} {}",
                category_icon(&product.category.name),
                product.category.name
            ))
            .size(14),
            text("Description").size(13).color(muted()),
            text(product.description.as_deref().unwrap_or("No description")).size(13),
            text("Images").size(13).color(muted()),
            images,
        ]
        .spacing(8)
        .into()
    }

    // -- Create / edit form panel --
    fn view_form<'a>(&'a self, heading: &'a str, form: &'a ProductForm) -> Element<'a, Message> {
        let fields = column![
            labeled_input("Title:", "Product title", &form.title, Message::FormTitleChanged),
            labeled_input("Price:", "0.00", &form.price, Message::FormPriceChanged),
            labeled_input(
                "Description:",
                "Optional description",
                &form.description,
                Message::FormDescriptionChanged,
            ),
            row![
                text("Category:").size(13).width(110),
                pick_list(
                    self.category_choices.clone(),
                    form.category.clone(),
                    Message::FormCategorySelected,
                )
                .placeholder("Select a category")
                .width(Fill),
            ]
            .spacing(10)
            .align_y(Center),
            labeled_input(
                "Images:",
                "Comma-separated image URLs",
                &form.images,
                Message::FormImagesChanged,
            ),
        ]
        .spacing(12);

        let mut actions = row![
            button(text("Save").size(13))
                .on_press_maybe((!self.busy).then_some(Message::FormSubmitted))
                .style(button::primary),
            button(text("Cancel").size(13))
                .on_press(Message::BackToGrid)
                .style(button::secondary),
        ]
        .spacing(10)
        .align_y(Center);
        if self.busy {
            actions = actions.push(text("Saving...").size(13).color(muted()));
        }

        column![text(heading).size(20), fields, actions]
            .spacing(16)
            .into()
    }
}

// ============================================================================
// Helper widgets
// ============================================================================

/// Label + text input on one row.
fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &str,
    on_change: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let owned_value = value.to_string();
    row![
        text(label).size(13).width(110),
        text_input(placeholder, &owned_value)
            .on_input(on_change)
            .width(Fill),
    ]
    .spacing(10)
    .align_y(Center)
    .into()
}

fn muted() -> iced::Color {
    iced::Color::from_rgb(0.6, 0.6, 0.6)
}

fn ok_green() -> iced::Color {
    iced::Color::from_rgb(0.4, 0.9, 0.4)
}

fn error_red() -> iced::Color {
    iced::Color::from_rgb(0.9, 0.4, 0.4)
}

// ============================================================================
// Grid scrolling
// ============================================================================

fn grid_id() -> iced::widget::Id {
    iced::widget::Id::new("product-grid")
}

/// Jump the grid back to the top after a page or filter change.
fn scroll_to_grid_top() -> Task<Message> {
    iced::widget::operation::scroll_to(
        grid_id(),
        scrollable::AbsoluteOffset { x: 0.0, y: 0.0 },
    )
}

// ============================================================================
// Misc helpers
// ============================================================================

/// Category icon keyed by name, with a default for unmapped names.
fn category_icon(name: &str) -> &'static str {
    match name {
        "Clothes" => "\u{1F455}",
        "Electronics" => "\u{1F4BB}",
        "Furniture" => "\u{1FA91}",
        "Shoes" => "\u{1F45F}",
        "Miscellaneous" => "\u{1F4E6}",
        _ => "\u{1F3F7}",
    }
}

/// Truncate on a character boundary, appending an ellipsis.
fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let head: String = value.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

/// Serialize the filtered list and write it where the user chose.
fn write_csv(products: &[Product], path: &Path) -> anyhow::Result<usize> {
    use anyhow::Context;

    let bytes = export::export_csv(products)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(products.len())
}
