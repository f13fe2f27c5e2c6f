/*!
# PokéAPI client

[`CatalogSource`](pokedex_catalog::CatalogSource) implementation backed by the
public PokéAPI REST service.

```text
GET {base}/pokemon?limit=N   -> count + listing
GET {base}/pokemon/{id}      -> detail record
GET {base}/type/{label}      -> category membership
```

Wire payloads are decoded into the types in [`models`] and converted into the
catalog's own records before they leave this crate.
*/

mod client;
pub mod models;

pub use client::PokeApiClient;
