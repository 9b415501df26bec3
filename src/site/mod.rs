//! Site registry: configuration, collections, layouts, taxonomy types,
//! front matter defaults, publishing policy, hooks and converters.
//!
//! A [`Site`] is assembled once through [`SiteBuilder`] and shared by every
//! resource as `Rc<Site>`.

mod collection;
mod defaults;
mod layout;
mod publisher;

pub use collection::Collection;
pub use defaults::{DefaultsResolver, FrontmatterDefaults};
pub use layout::{Layout, LayoutRegistry};
pub use publisher::{Publish, Publisher};

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::config::SiteConfig;
use crate::hooks::{HookDispatcher, HookRegistry};
use crate::resource::{Resource, ResourceError, Result, TaxonomyType};
use crate::transform::{Converter, IdentityConverter, MarkdownConverter};
use crate::utils::date::DateTimeUtc;

pub struct Site {
    config: SiteConfig,
    collections: BTreeMap<String, Rc<Collection>>,
    layouts: LayoutRegistry,
    taxonomy_types: Vec<Rc<TaxonomyType>>,
    defaults: Rc<dyn DefaultsResolver>,
    publisher: Box<dyn Publish>,
    hooks: Box<dyn HookDispatcher>,
    converters: Vec<Rc<dyn Converter>>,
    time: DateTimeUtc,
}

impl Site {
    pub fn builder(config: SiteConfig) -> SiteBuilder {
        SiteBuilder::new(config)
    }

    /// Build a site with the default collaborators.
    pub fn load(config: SiteConfig) -> Result<Rc<Self>> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn collection(&self, label: &str) -> Option<&Rc<Collection>> {
        self.collections.get(label)
    }

    pub fn collections(&self) -> impl Iterator<Item = &Rc<Collection>> {
        self.collections.values()
    }

    pub fn layouts(&self) -> &LayoutRegistry {
        &self.layouts
    }

    pub fn taxonomy_types(&self) -> &[Rc<TaxonomyType>] {
        &self.taxonomy_types
    }

    pub fn defaults(&self) -> &Rc<dyn DefaultsResolver> {
        &self.defaults
    }

    pub fn publisher(&self) -> &dyn Publish {
        self.publisher.as_ref()
    }

    pub fn hooks(&self) -> &dyn HookDispatcher {
        self.hooks.as_ref()
    }

    /// Converters ordered by descending priority.
    pub fn converters(&self) -> &[Rc<dyn Converter>] {
        &self.converters
    }

    /// Build timestamp, the fallback date of undated resources.
    pub fn time(&self) -> DateTimeUtc {
        self.time
    }

    /// Read every resource of the collection labeled `label`.
    pub fn read_collection(self: &Rc<Self>, label: &str) -> Result<Vec<Resource>> {
        let collection = self
            .collection(label)
            .cloned()
            .ok_or_else(|| ResourceError::UnknownCollection(label.to_string()))?;
        collection.read_resources(self)
    }
}

impl fmt::Debug for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site")
            .field("root", &self.config.get_root())
            .field("collections", &self.collections.keys().collect::<Vec<_>>())
            .field("layouts", &self.layouts.len())
            .field("time", &self.time)
            .finish()
    }
}

/// Assembles a [`Site`], defaulting every collaborator from the config.
pub struct SiteBuilder {
    config: SiteConfig,
    layouts: Option<LayoutRegistry>,
    defaults: Option<Rc<dyn DefaultsResolver>>,
    publisher: Option<Box<dyn Publish>>,
    hooks: Box<dyn HookDispatcher>,
    converters: Vec<Rc<dyn Converter>>,
    time: Option<DateTimeUtc>,
}

impl SiteBuilder {
    fn new(config: SiteConfig) -> Self {
        Self {
            config,
            layouts: None,
            defaults: None,
            publisher: None,
            hooks: Box::new(HookRegistry::new()),
            converters: vec![Rc::new(MarkdownConverter::new()), Rc::new(IdentityConverter)],
            time: None,
        }
    }

    /// Use `layouts` instead of loading the layouts directory.
    pub fn layouts(mut self, layouts: LayoutRegistry) -> Self {
        self.layouts = Some(layouts);
        self
    }

    pub fn defaults(mut self, defaults: impl DefaultsResolver + 'static) -> Self {
        self.defaults = Some(Rc::new(defaults));
        self
    }

    pub fn publisher(mut self, publisher: impl Publish + 'static) -> Self {
        self.publisher = Some(Box::new(publisher));
        self
    }

    pub fn hooks(mut self, hooks: impl HookDispatcher + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Add a converter next to the built-in ones.
    pub fn converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converters.push(Rc::new(converter));
        self
    }

    /// Fix the build time instead of reading the clock.
    pub fn time(mut self, time: DateTimeUtc) -> Self {
        self.time = Some(time);
        self
    }

    pub fn build(self) -> Result<Rc<Site>> {
        let config = self.config;
        let time = self.time.unwrap_or_else(DateTimeUtc::now);

        let layouts = match self.layouts {
            Some(layouts) => layouts,
            None => LayoutRegistry::load(&config.layouts_dir())?,
        };

        let collections = config
            .collections
            .iter()
            .map(|(label, cfg)| (label.clone(), Rc::new(Collection::new(label, cfg.clone()))))
            .collect();

        let taxonomy_types = config
            .taxonomies
            .iter()
            .map(|(label, cfg)| Rc::new(TaxonomyType::from_config(label, cfg)))
            .collect();

        let defaults = self
            .defaults
            .unwrap_or_else(|| Rc::new(FrontmatterDefaults::new(config.defaults.clone())));

        let publisher = self.publisher.unwrap_or_else(|| {
            Box::new(Publisher {
                future: config.build.future,
                unpublished: config.build.unpublished,
                time,
            })
        });

        let mut converters = self.converters;
        converters.sort_by_key(|converter| std::cmp::Reverse(converter.priority()));

        Ok(Rc::new(Site {
            config,
            collections,
            layouts,
            taxonomy_types,
            defaults,
            publisher,
            hooks: self.hooks,
            converters,
            time,
        }))
    }
}
