//! GraphQL operation documents. Names and shapes are fixed by the API.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// A named GraphQL document. `field` is the root field whose value the
/// gateway extracts from `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub field: &'static str,
    pub kind: OperationKind,
    pub document: &'static str,
}

pub const AUTHENTICATE: Operation = Operation {
    name: "authenticate",
    field: "authenticate",
    kind: OperationKind::Query,
    document: r#"query authenticate($userName: String!, $password: String!) {
  authenticate(userName: $userName, password: $password) {
    name
    nickName
  }
}"#,
};

pub const GET_ARTICLE_BY_ID: Operation = Operation {
    name: "getArticleById",
    field: "getArticleById",
    kind: OperationKind::Query,
    document: r#"query getArticleById($id: ID!) {
  getArticleById(id: $id) {
    _id
    title
    tags
    markdown
    isDeleted
    isPublished
  }
}"#,
};

pub const GET_ARTICLES_BY_PAGE: Operation = Operation {
    name: "getArticlesByPage",
    field: "getArticlesByPage",
    kind: OperationKind::Query,
    document: r#"query getArticlesByPage($page: Int!, $limit: Int!, $where: QueryWhereInput, $sort: SortInput) {
  getArticlesByPage(page: $page, limit: $limit, where: $where, sort: $sort) {
    docs {
      _id
      title
      markdown
      tags
      postAt
      updateAt
      views
      liked
      isPublished
      isDeleted
    }
    totalDocs
    hasNextPage
    nextPage
    page
    limit
  }
}"#,
};

pub const ADD_ARTICLE: Operation = Operation {
    name: "addArticle",
    field: "addArticle",
    kind: OperationKind::Mutation,
    document: r#"mutation addArticle($data: AddOrUpdateArticleInput!) {
  addArticle(data: $data) {
    _id
  }
}"#,
};

pub const UPDATE_ARTICLE: Operation = Operation {
    name: "updateArticle",
    field: "updateArticle",
    kind: OperationKind::Mutation,
    document: r#"mutation updateArticle($id: ID!, $data: AddOrUpdateArticleInput!) {
  updateArticle(id: $id, data: $data) {
    _id
  }
}"#,
};

pub const UPDATE_DELETE_STATUS: Operation = Operation {
    name: "updateDeleteStatus",
    field: "updateDeleteStatus",
    kind: OperationKind::Mutation,
    document: r#"mutation updateDeleteStatus($id: ID!, $newStatus: Boolean!) {
  updateDeleteStatus(id: $id, newStatus: $newStatus) {
    _id
    isDeleted
  }
}"#,
};

pub const UPDATE_PUBLISH_STATUS: Operation = Operation {
    name: "updatePublishStatus",
    field: "updatePublishStatus",
    kind: OperationKind::Mutation,
    document: r#"mutation updatePublishStatus($id: ID!, $newStatus: Boolean!) {
  updatePublishStatus(id: $id, newStatus: $newStatus) {
    _id
    isPublished
  }
}"#,
};
