// src/infrastructure/repositories/sqlite_site.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::media::ImageRef;
use crate::domain::site::{
    LinkTarget, MenuLink, MenuText, SiteDescription, SiteSetup, SiteSetupRepository, SiteTitle,
    SiteVisibility,
};
use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

/// Primary key of the only setup row.
const SETUP_ID: i64 = 1;

#[derive(Clone)]
pub struct SqliteSiteSetupRepository {
    pool: SqlitePool,
}

impl SqliteSiteSetupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
#[allow(clippy::struct_excessive_bools)]
struct SetupRow {
    title: String,
    description: String,
    show_header: bool,
    show_search: bool,
    show_menu: bool,
    show_description: bool,
    show_pagination: bool,
    show_footer: bool,
    favicon: Option<String>,
}

#[derive(Debug, FromRow)]
struct MenuLinkRow {
    text: String,
    url_or_path: String,
    new_tab: bool,
}

impl TryFrom<MenuLinkRow> for MenuLink {
    type Error = DomainError;

    fn try_from(row: MenuLinkRow) -> Result<Self, Self::Error> {
        Ok(MenuLink {
            text: MenuText::new(row.text)?,
            url_or_path: LinkTarget::new(row.url_or_path)?,
            new_tab: row.new_tab,
        })
    }
}

impl SetupRow {
    fn into_setup(self, menu_links: Vec<MenuLink>) -> DomainResult<SiteSetup> {
        Ok(SiteSetup {
            title: SiteTitle::new(self.title)?,
            description: SiteDescription::new(self.description)?,
            visibility: SiteVisibility {
                show_header: self.show_header,
                show_search: self.show_search,
                show_menu: self.show_menu,
                show_description: self.show_description,
                show_pagination: self.show_pagination,
                show_footer: self.show_footer,
            },
            favicon: ImageRef::optional(self.favicon)?,
            menu_links,
        })
    }
}

#[async_trait]
impl SiteSetupRepository for SqliteSiteSetupRepository {
    async fn get(&self) -> DomainResult<Option<SiteSetup>> {
        let Some(row) = sqlx::query_as::<_, SetupRow>(
            "SELECT title, description, show_header, show_search, show_menu, show_description, \
             show_pagination, show_footer, favicon FROM site_setup WHERE id = ?",
        )
        .bind(SETUP_ID)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        else {
            return Ok(None);
        };

        let links = sqlx::query_as::<_, MenuLinkRow>(
            "SELECT text, url_or_path, new_tab FROM menu_links \
             WHERE site_setup_id = ? ORDER BY position, id",
        )
        .bind(SETUP_ID)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(MenuLink::try_from)
        .collect::<DomainResult<Vec<_>>>()?;

        row.into_setup(links).map(Some)
    }

    async fn save(&self, setup: SiteSetup) -> DomainResult<SiteSetup> {
        let visibility = setup.visibility;
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO site_setup (id, title, description, show_header, show_search, show_menu, \
             show_description, show_pagination, show_footer, favicon) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (id) DO UPDATE SET title = excluded.title, \
             description = excluded.description, show_header = excluded.show_header, \
             show_search = excluded.show_search, show_menu = excluded.show_menu, \
             show_description = excluded.show_description, \
             show_pagination = excluded.show_pagination, show_footer = excluded.show_footer, \
             favicon = excluded.favicon",
        )
        .bind(SETUP_ID)
        .bind(setup.title.as_str())
        .bind(setup.description.as_str())
        .bind(visibility.show_header)
        .bind(visibility.show_search)
        .bind(visibility.show_menu)
        .bind(visibility.show_description)
        .bind(visibility.show_pagination)
        .bind(visibility.show_footer)
        .bind(setup.favicon.as_ref().map(ImageRef::as_str))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        sqlx::query("DELETE FROM menu_links WHERE site_setup_id = ?")
            .bind(SETUP_ID)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        if !setup.menu_links.is_empty() {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO menu_links (site_setup_id, position, text, url_or_path, new_tab) ",
            );
            builder.push_values(setup.menu_links.iter().zip(0_i64..), |mut row, (link, position)| {
                row.push_bind(SETUP_ID)
                    .push_bind(position)
                    .push_bind(link.text.as_str().to_string())
                    .push_bind(link.url_or_path.as_str().to_string())
                    .push_bind(link.new_tab);
            });
            builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        tracing::debug!(links = setup.menu_links.len(), "site setup persisted");
        Ok(setup)
    }
}
